use std::time::SystemTime;

use berthplan_core::{AgencyDirectory, BerthMetricCalculator, BerthPlanXmlBuilder, etc_envelope};
use chrono::{Local, NaiveDate};
use http_client::HttpClient;
use snafu::ResultExt;
use tracing::{error, info, instrument, warn};

use crate::{
    archive::{Archive, ArchiveKind},
    berth_plan_api::{BerthPlanApiClient, PlanningWindow},
    error::{Result, error::XmlGenerationSnafu},
    etc_database::SqlServerEtcSource,
    ports::{BerthPlanSource, EtcSource, XmlSink},
    settings::{Settings, SoapEndpointSettings},
    soap::SoapClient,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Delivered,
    Skipped,
    Failed,
}

/// Outcome of both stages of a synchronisation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub etc: StageOutcome,
    pub berth_plan: StageOutcome,
}

pub struct App {
    days_back: u32,
    days_ahead: u32,
    calculator: BerthMetricCalculator,
    agencies: AgencyDirectory,
    archive: Archive,
    berth_plan_source: Box<dyn BerthPlanSource>,
    berth_plan_sink: Box<dyn XmlSink>,
    etc_source: Option<Box<dyn EtcSource>>,
    etc_sink: Box<dyn XmlSink>,
}

impl App {
    pub fn build(settings: &Settings) -> Result<App> {
        let berth_plan_client = HttpClient::builder()
            .accept_invalid_certs(settings.berth_plan.accept_invalid_certs)
            .max_retries(0)
            .build()?;

        let berth_plan_source = BerthPlanApiClient::new(
            berth_plan_client,
            settings.berth_plan.clone(),
            &settings.terminal,
        );

        let etc_source = settings
            .etc_database
            .clone()
            .map(|s| Box::new(SqlServerEtcSource::new(s)) as Box<dyn EtcSource>);

        Ok(App {
            days_back: settings.terminal.days_back,
            days_ahead: settings.terminal.days_ahead,
            calculator: BerthMetricCalculator::new(settings.terminal.geometry),
            agencies: AgencyDirectory::default(),
            archive: Archive::new(&settings.archive),
            berth_plan_source: Box::new(berth_plan_source),
            berth_plan_sink: Box::new(soap_client(&settings.berth_plan_delivery)?),
            etc_source,
            etc_sink: Box::new(soap_client(&settings.etc_delivery)?),
        })
    }

    /// Replaces the configured ETC source.
    pub fn with_etc_source(mut self, source: impl EtcSource + 'static) -> App {
        self.etc_source = Some(Box::new(source));
        self
    }

    pub async fn run(&self) -> CycleReport {
        self.run_for(Local::now().date_naive()).await
    }

    /// Runs one cycle with the planning window centred on `today`.
    ///
    /// A failing stage is logged and reported, it never prevents the other stage from running.
    #[instrument(skip(self))]
    pub async fn run_for(&self, today: NaiveDate) -> CycleReport {
        let etc = match self.run_etc().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("etc stage failed: {e:?}");
                StageOutcome::Failed
            }
        };

        let window = PlanningWindow::around(today, self.days_back, self.days_ahead);
        let berth_plan = match self.run_berth_plan(&window).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("berth plan stage failed: {e:?}");
                StageOutcome::Failed
            }
        };

        let report = CycleReport { etc, berth_plan };
        info!(?report, "synchronisation cycle finished");
        report
    }

    #[instrument(skip_all)]
    async fn run_etc(&self) -> Result<StageOutcome> {
        let Some(source) = &self.etc_source else {
            warn!("no etc database configured, skipping etc message");
            return Ok(StageOutcome::Skipped);
        };

        let Some(fragment) = source.etc_fragment().await? else {
            warn!("no etc data to send");
            return Ok(StageOutcome::Skipped);
        };

        let xml = etc_envelope(&fragment).context(XmlGenerationSnafu)?;

        // The document is archived even if delivery fails.
        let delivery = self.etc_sink.deliver(xml.clone()).await;

        self.archive
            .store(ArchiveKind::Etc, &xml, Local::now())
            .await?;
        self.archive.prune(SystemTime::now()).await?;

        delivery.map(|_| StageOutcome::Delivered)
    }

    #[instrument(skip_all, fields(app.from = %window.start(), app.to = %window.end()))]
    async fn run_berth_plan(&self, window: &PlanningWindow) -> Result<StageOutcome> {
        let records = self.berth_plan_source.berth_plan(window).await?;

        let xml = BerthPlanXmlBuilder::new(&self.calculator, &self.agencies)
            .build(&records, &window.start_date(), &window.end_date())
            .context(XmlGenerationSnafu)?;

        self.archive
            .store(ArchiveKind::BerthPlan, &xml, Local::now())
            .await?;

        info!(
            app.days = window.days(),
            "sending berth plan from {} to {}",
            window.start_date(),
            window.end_date()
        );
        self.berth_plan_sink.deliver(xml).await?;

        Ok(StageOutcome::Delivered)
    }
}

fn soap_client(settings: &SoapEndpointSettings) -> Result<SoapClient> {
    let client = HttpClient::builder()
        .accept_invalid_certs(settings.accept_invalid_certs)
        .max_retries(0)
        .build()?;

    Ok(SoapClient::new(client, settings.clone()))
}
