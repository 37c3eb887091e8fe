pub mod answer;
pub mod deadline;
pub mod error;
pub mod image;
pub mod prompt;
pub mod reference;

pub use answer::{AnswerService, AnswerSettings};
pub use deadline::{with_deadline, CallOutcome};
pub use error::{AnswerError, Stage};
pub use image::find_image_url;
pub use prompt::{build_context, normalize_answer, render_prompt, ANSWER_TEMPLATE};
pub use reference::{HttpReferenceFetcher, ReferenceEntry, ReferenceFetcher};
