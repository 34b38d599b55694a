use async_trait::async_trait;
use berthplan_core::BerthRecord;

use crate::{berth_plan_api::PlanningWindow, error::Result};

#[async_trait]
pub trait BerthPlanSource: Send + Sync {
    async fn berth_plan(&self, window: &PlanningWindow) -> Result<Vec<BerthRecord>>;
}

/// Provides the pre-rendered `TerminalComercialOperation` fragment.
#[async_trait]
pub trait EtcSource: Send + Sync {
    /// Returns `None` when there are no working vessel visits to report.
    async fn etc_fragment(&self) -> Result<Option<String>>;
}

#[async_trait]
pub trait XmlSink: Send + Sync {
    async fn deliver(&self, xml: String) -> Result<()>;
}
