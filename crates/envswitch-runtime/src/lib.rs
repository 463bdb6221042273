#![forbid(unsafe_code)]

//! Runtime: the environment controller and its next-cycle task queue.

pub mod controller;
pub mod simulator;
pub mod ui_queue;

pub use controller::{
    ControllerConfig, ControllerError, ControllerResult, DEFAULT_TRIGGER_ORIGIN,
    EnvironmentController, PointerDisposition, UiTask,
};
pub use simulator::RecordingPresenter;
pub use ui_queue::UiQueue;
