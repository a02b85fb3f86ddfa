//! The STS 2012–2016 tasks and their splits.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use fbow_core::constants::STS_DATA_DIR;
use fbow_core::errors::DatasetError;

use super::split::Benchmark;

/// A SemEval STS task (English test sets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StsTask {
    Sts12,
    Sts13,
    Sts14,
    Sts15,
    Sts16,
}

impl StsTask {
    pub const ALL: [StsTask; 5] = [Self::Sts12, Self::Sts13, Self::Sts14, Self::Sts15, Self::Sts16];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sts12 => "STS12",
            Self::Sts13 => "STS13",
            Self::Sts14 => "STS14",
            Self::Sts15 => "STS15",
            Self::Sts16 => "STS16",
        }
    }

    /// Split names in evaluation order.
    pub fn splits(&self) -> &'static [&'static str] {
        match self {
            Self::Sts12 => &[
                "MSRpar",
                "MSRvid",
                "SMTeuroparl",
                "surprise.OnWN",
                "surprise.SMTnews",
            ],
            // The SMT split is not redistributed.
            Self::Sts13 => &["FNWN", "headlines", "OnWN"],
            Self::Sts14 => &[
                "deft-forum",
                "deft-news",
                "headlines",
                "images",
                "OnWN",
                "tweet-news",
            ],
            Self::Sts15 => &[
                "answers-forums",
                "answers-students",
                "belief",
                "headlines",
                "images",
            ],
            Self::Sts16 => &[
                "answer-answer",
                "headlines",
                "plagiarism",
                "postediting",
                "question-question",
            ],
        }
    }

    /// Directory of this task relative to the task path.
    pub fn relative_dir(&self) -> String {
        format!("{}/{}-en-test", STS_DATA_DIR, self.name())
    }

    /// Load all splits of this task from `<task_path>/downstream/STS/<TASK>-en-test`.
    pub fn load(&self, task_path: &Path) -> Result<Benchmark, DatasetError> {
        let dir = task_path.join(self.relative_dir());
        Benchmark::load_dir(self.name(), &dir, self.splits())
    }
}

impl fmt::Display for StsTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StsTask {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| DatasetError::UnknownTask(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_names_parse() {
        for task in StsTask::ALL {
            assert_eq!(task.name().parse::<StsTask>().unwrap(), task);
        }
        assert!(matches!(
            "STS17".parse::<StsTask>(),
            Err(DatasetError::UnknownTask(_))
        ));
    }

    #[test]
    fn test_split_counts() {
        let counts: Vec<usize> = StsTask::ALL.iter().map(|t| t.splits().len()).collect();
        assert_eq!(counts, vec![5, 3, 6, 5, 5]);
    }

    #[test]
    fn test_relative_dir() {
        assert_eq!(StsTask::Sts14.relative_dir(), "downstream/STS/STS14-en-test");
    }
}
