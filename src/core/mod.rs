pub mod deletion;
pub mod inventory;
pub mod source;


pub use deletion::{delete_many, delete_one, plan, DeletionOutcome, DeletionPlan};
pub use inventory::{build_inventory, inventory, BranchRecord, Correlation, Locality};
pub use source::BranchSource;
