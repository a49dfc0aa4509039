use crate::matcher::operator::Operator;
use feedsift_common_api::Entry;

const OPERATOR_NAME: &str = "false";

/// A matching matcher.operator that never matches.
/// It stands in for rule lines that cannot be built.
#[derive(Debug)]
pub struct False {}

impl Operator for False {
    fn name(&self) -> &str {
        OPERATOR_NAME
    }

    fn evaluate(&self, _entry: &Entry) -> bool {
        false
    }
}
