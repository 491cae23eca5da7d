//! Client-side roster state: the session facade and the assignment workflow.

pub mod assignment;
pub mod session;

pub use assignment::{AssignmentState, AssignmentWorkflow, CommitOutcome};
pub use session::{PlayerDraft, RosterSession};
pub use storage::{
    AssignmentReport, ColorPicker, PaletteColorPicker, RandomColorPicker, RosterStore,
    StoreOptions,
};
