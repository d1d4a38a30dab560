//! headerbar - a headless header bar element with title font-fit
//!
//! A header bar holds an optional leading action button (back, close, menu),
//! one or more titles and any number of user controls. Whenever something
//! that moves the title changes, the header shrinks the title font and
//! re-centers it so it never collides with the controls around it:
//! - Pure layout decisions over a pluggable text measurement oracle
//! - Debounced, cancellable fit scheduling with awaitable handles
//! - Mutation filtering that only refits on changes that matter
//! - Direction-aware (LTR/RTL) placement and action icons

pub mod component;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod header;
pub mod host;
pub mod i18n;
pub mod layout;
pub mod measure;
pub mod observer;
pub mod scheduler;
pub mod style;

// Re-export commonly used types
pub use component::{Element, LifecycleState};
pub use config::{ActionIcon, ActionType, FitSettings, HeaderConfig, IntoPixels};
pub use dom::{ChildKind, ChildNode, ControlKind, MutationRecord, NodeId};
pub use error::{HeaderError, MeasureError};
pub use event::{ActionEvent, Event, EventHandler, MouseButton};
#[cfg(feature = "tui")]
pub use event::CellSize;
pub use header::Header;
pub use host::{FixedHost, Host};
pub use i18n::{DirectionSignal, TextDirection};
pub use layout::{FitDecision, LayoutResult, SkipReason, StyleId, TitleSpace};
pub use measure::{FitOptions, FitResult, FontFit, FontSpec, Measure};
pub use observer::ChangeObserver;
pub use scheduler::{FitHandle, FitReport, Scheduler};
pub use style::{PhysicalStyle, Style, StyleProperty};
