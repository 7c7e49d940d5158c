pub mod analysis;
pub mod context;
pub mod cv;

pub use analysis::{CvAnalysis, TrendSummary};
pub use context::{Engagement, TargetKind, UserContext};
pub use cv::{CvRecord, Education, Experience, PersonalInfo, Project};
