pub mod mode;
pub mod selection;
pub mod state;
pub mod status;

pub use mode::QuestionMode;
pub use selection::{transition, Selection, SelectionAction};
pub use state::AppState;
pub use status::{BusyGuard, Status, StatusReporter};
