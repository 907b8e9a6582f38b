use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestResult {
    Failed,
    Passed,
    Pending,
    Success,
}

impl TestResult {
    pub const ALL: [TestResult; 4] = [
        TestResult::Failed,
        TestResult::Passed,
        TestResult::Pending,
        TestResult::Success,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TestResult::Failed => "Failed",
            TestResult::Passed => "Passed",
            TestResult::Pending => "Pending",
            TestResult::Success => "Success",
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token that doesn't name any result category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedResult(pub String);

impl fmt::Display for UnrecognizedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} is not one of Failed, Passed, Pending, Success",
            self.0
        )
    }
}

impl std::error::Error for UnrecognizedResult {}

impl FromStr for TestResult {
    type Err = UnrecognizedResult;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TestResult::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnrecognizedResult(trimmed.to_string()))
    }
}

/// An editable column of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SystemName,
    TestType,
    Result,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::SystemName => "system name",
            Field::TestType => "test type",
            Field::Result => "test result",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub system_name: String,
    pub test_type: String,
    pub result: TestResult,
    // false means soft-deleted
    pub active: bool,
}

impl Record {
    pub fn new(id: u64, system_name: String, test_type: String, result: TestResult) -> Self {
        Self {
            id,
            system_name,
            test_type,
            result,
            active: true,
        }
    }

    /// Case-insensitive substring match over ID, name, type and result name.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.id.to_string().contains(needle)
            || self.system_name.to_lowercase().contains(needle)
            || self.test_type.to_lowercase().contains(needle)
            || self.result.name().to_lowercase().contains(needle)
    }
}
