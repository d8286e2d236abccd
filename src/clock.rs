use chrono::{Local, NaiveDate};

/// Source of "today" for daily logging and streak walks.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;

    fn yesterday_of(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.pred_opt()
    }
}

/// Local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
