use async_trait::async_trait;
use berthplan_core::BerthRecord;
use chrono::{Days, Local, NaiveDate};
use http_client::HttpClient;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::{
    error::Result,
    oauth::BearerToken,
    ports::BerthPlanSource,
    settings::{BerthPlanApiSettings, TerminalSettings},
};

static DATE_FORMAT: &str = "%Y-%m-%d";
static TOKEN_EXPIRY_WARNING_DAYS: i64 = 14;

/// The range of days requested from the berth plan API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanningWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl PlanningWindow {
    pub fn around(today: NaiveDate, days_back: u32, days_ahead: u32) -> PlanningWindow {
        PlanningWindow {
            start: today - Days::new(days_back.into()),
            end: today + Days::new(days_ahead.into()),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_date(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_date(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenExpiry {
    Valid { days_remaining: i64 },
    ExpiresSoon { days_remaining: i64 },
    Expired { days_ago: i64 },
}

impl TokenExpiry {
    pub fn at(expiry_date: NaiveDate, today: NaiveDate) -> TokenExpiry {
        let days_remaining = (expiry_date - today).num_days();
        if days_remaining < 0 {
            TokenExpiry::Expired {
                days_ago: -days_remaining,
            }
        } else if days_remaining < TOKEN_EXPIRY_WARNING_DAYS {
            TokenExpiry::ExpiresSoon { days_remaining }
        } else {
            TokenExpiry::Valid { days_remaining }
        }
    }

    fn log(&self, expiry_date: NaiveDate) {
        match self {
            TokenExpiry::Valid { days_remaining } => {
                info!("consumer key valid until {expiry_date}, {days_remaining} days remaining")
            }
            TokenExpiry::ExpiresSoon { days_remaining } => {
                warn!("consumer key expires on {expiry_date}, only {days_remaining} days remaining")
            }
            TokenExpiry::Expired { days_ago } => {
                error!("consumer key expired on {expiry_date}, {days_ago} days ago")
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BerthPlanQuery<'a> {
    terminal: &'a str,
    from_date: String,
    to_date: String,
}

/// Fetches the berth plan from the terminal's REST API.
pub struct BerthPlanApiClient {
    client: HttpClient,
    settings: BerthPlanApiSettings,
    terminal: String,
}

impl BerthPlanApiClient {
    pub fn new(
        client: HttpClient,
        settings: BerthPlanApiSettings,
        terminal: &TerminalSettings,
    ) -> BerthPlanApiClient {
        BerthPlanApiClient {
            client,
            settings,
            terminal: terminal.code.clone(),
        }
    }
}

#[async_trait]
impl BerthPlanSource for BerthPlanApiClient {
    #[instrument(skip_all, fields(app.terminal = %self.terminal, app.from = %window.start(), app.to = %window.end()))]
    async fn berth_plan(&self, window: &PlanningWindow) -> Result<Vec<BerthRecord>> {
        if let Some(expiry_date) = self.settings.token_expiry_date {
            TokenExpiry::at(expiry_date, Local::now().date_naive()).log(expiry_date);
        }

        let token = BearerToken::acquire(&self.client, &self.settings.oauth).await?;

        let query = BerthPlanQuery {
            terminal: &self.terminal,
            from_date: window.start_date(),
            to_date: window.end_date(),
        };

        let records: Vec<BerthRecord> = self
            .client
            .get(&self.settings.url)
            .query(&query)
            .bearer_auth(token.secret())
            .header("Consumer-Key", &self.settings.consumer_key)
            .send()
            .await?
            .json()
            .await?;

        info!(app.num_records = records.len(), "fetched berth plan");

        Ok(records)
    }
}
