pub mod json;
pub mod terminal;

use crate::model::AggregatedReport;

pub trait Reporter {
    fn report(&self, result: &AggregatedReport) -> String;
}
