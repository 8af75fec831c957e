pub mod extractor;
pub mod poll_loop;
pub mod tracker;
pub mod validator;

pub use crate::domain::model::{
    HomeworkRecord, StatusUpdate, TrackedState, ValidatedPayload, Verdict,
};
pub use crate::domain::ports::{ConfigProvider, Notifier, StatusApi};
pub use crate::utils::error::Result;
