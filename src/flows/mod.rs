//! Screen state machines, independent of rendering and I/O.

pub mod admin;
pub mod notice;
pub mod result;

pub use admin::{AdminFlow, FormField, FormMode, ListPhase, QuestionForm, SaveRequest};
pub use notice::{Notice, NoticeKind};
pub use result::{ResultView, ScoreColor, ScoreTier};
pub use test::{TestFlow, TestPhase};
