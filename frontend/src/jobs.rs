use serde::Deserialize;
use serde_json::Value;

/// Body of the jobs dashboard status feed (`api/json`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsFeed {
    #[serde(default)]
    pub running_jobs: Vec<JobInfo>,
    #[serde(default)]
    pub recently_finished_jobs: Vec<Value>,
}

impl JobsFeed {
    /// Waiting jobs count as running; the server lists both.
    pub fn has_running_jobs(&self) -> bool {
        !self.running_jobs.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: JobState,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default)]
    pub elapsed_time: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Waiting,
    Running,
    Success,
    Failure,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default)]
    pub percent_progress: i32,
    #[serde(default)]
    pub current_status: String,
}
