use chrono::{DateTime, Utc};
use snafu::ResultExt;
use tracing::{debug, error, info, instrument};

use crate::{
    AgencyDirectory, BerthMetricCalculator, BerthRecord, MetricResult,
    error::XmlGenerationError,
    format_datetime,
    xml_generation_error::{MetricsSnafu, WriteSnafu},
    xml_writer::XmlWriter,
};

pub static SOAPENV_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub static TMSA_NAMESPACE: &str = "http://ADEVEAI/TMSA_BERTHPLAN.pub";

static MSG_VERSION: &str = "3.0";
static SENDER: &str = "APMT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum BerthingSide {
    #[strum(serialize = "StarbordSide")]
    Starboard,
    #[strum(serialize = "PortSide")]
    Port,
}

impl From<bool> for BerthingSide {
    fn from(is_starboard: bool) -> Self {
        if is_starboard {
            BerthingSide::Starboard
        } else {
            BerthingSide::Port
        }
    }
}

/// A berth record projected onto the `berthinformation` schema, every value already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct BerthInformation {
    pub voyage_number: String,
    pub vessel_name: String,
    pub vessel_code: String,
    pub imo: String,
    pub loa: String,
    pub after_metric_point: String,
    pub forward_metric_point: String,
    pub etb: String,
    pub etd: String,
    pub etc: String,
    pub emp: String,
    pub berthing_side: BerthingSide,
    pub service_code: String,
    pub service_name: String,
    pub total_moves: i64,
    pub discharge_moves: i64,
    pub load_moves: i64,
    pub restow_moves: i64,
    pub number_of_cranes_avg: String,
    pub marine_agent: String,
    pub metrics: MetricResult,
}

impl BerthInformation {
    pub fn new(
        record: &BerthRecord,
        metrics: MetricResult,
        agencies: &AgencyDirectory,
    ) -> BerthInformation {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let date = |v: &Option<String>| format_datetime(v.as_deref().unwrap_or_default());

        // The downstream schema labels the fore point as `afterMetricPoint` and the aft point as
        // `forwardMetricPoint`/`bowBollard`. Consumers depend on this binding.
        BerthInformation {
            voyage_number: text(&record.arrival_voyage),
            vessel_name: text(&record.vessel_name),
            vessel_code: text(&record.vessel_code),
            imo: text(&record.imo_code),
            loa: record
                .vessel_loa
                .map(|v| v.to_string())
                .unwrap_or_default(),
            after_metric_point: metrics.fore.to_string(),
            forward_metric_point: metrics.aft.to_string(),
            etb: date(&record.etb),
            etd: date(&record.etd),
            etc: date(&record.etc),
            emp: text(&record.operator_code),
            berthing_side: record.is_starboard_berth.into(),
            service_code: text(&record.service_route),
            service_name: text(&record.service_name),
            total_moves: record.total_moves(),
            discharge_moves: record.discharge_moves(),
            load_moves: record.load_moves(),
            restow_moves: record.shifting_moves(),
            number_of_cranes_avg: format!("{:.2}", record.average_cranes.unwrap_or_default()),
            marine_agent: agencies
                .marine_agent(record.operator_code.as_deref())
                .to_owned(),
            metrics,
        }
    }

    fn write(&self, writer: &mut XmlWriter) -> std::fmt::Result {
        writer.start("berthinformation", &[])?;
        writer.element("berthPurpose", "DischargeLoad")?;
        writer.element("requestStatus", "Reservation")?;
        writer.element("voyageNumber", &self.voyage_number)?;
        writer.element("vesselName", &self.vessel_name)?;
        writer.element("vesselCode", &self.vessel_code)?;
        writer.element("IMO", &self.imo)?;
        writer.element("vesselType", "Container")?;
        writer.element("LOA", &self.loa)?;
        writer.element("afterMetricPoint", &self.after_metric_point)?;
        writer.element("forwardMetricPoint", &self.forward_metric_point)?;
        writer.element("ETB", &self.etb)?;
        writer.element("ETD", &self.etd)?;
        writer.element("ETC", &self.etc)?;
        writer.element("forwardDraught", "0")?;
        writer.element("afterDraught", "0")?;
        writer.element("dockName", "1")?;
        writer.element("EMP", &self.emp)?;
        writer.element("bowBollard", &self.forward_metric_point)?;
        writer.element("berthingSide", &self.berthing_side.to_string())?;
        writer.element("serviceCode", &self.service_code)?;
        writer.element("serviceName", &self.service_name)?;
        writer.element("totalMoves", &self.total_moves.to_string())?;
        writer.element("dischargeMoves", &self.discharge_moves.to_string())?;
        writer.element("loadMoves", &self.load_moves.to_string())?;
        writer.element("restowMoves", &self.restow_moves.to_string())?;
        writer.element("numberOfCranesAvg", &self.number_of_cranes_avg)?;
        writer.element("marineAgent", &self.marine_agent)?;
        writer.start("securite", &[])?;
        writer.element("siCertificatISPS", "false")?;
        writer.element("referenceCertificatISPS", "0")?;
        writer.end()?;
        writer.end()
    }
}

/// Renders berth plans into the `processBerthPlan` SOAP document.
pub struct BerthPlanXmlBuilder<'a> {
    calculator: &'a BerthMetricCalculator,
    agencies: &'a AgencyDirectory,
}

impl<'a> BerthPlanXmlBuilder<'a> {
    pub fn new(
        calculator: &'a BerthMetricCalculator,
        agencies: &'a AgencyDirectory,
    ) -> BerthPlanXmlBuilder<'a> {
        BerthPlanXmlBuilder {
            calculator,
            agencies,
        }
    }

    /// Builds the document with the current time as generation timestamp.
    pub fn build(
        &self,
        records: &[BerthRecord],
        start_date: &str,
        end_date: &str,
    ) -> Result<String, XmlGenerationError> {
        self.build_at(records, start_date, end_date, Utc::now())
    }

    /// Either the whole document is produced or an error is returned, a record with an unusable
    /// bollard reference fails the entire build.
    #[instrument(skip_all, fields(app.num_records = records.len()))]
    pub fn build_at(
        &self,
        records: &[BerthRecord],
        start_date: &str,
        end_date: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<String, XmlGenerationError> {
        info!("starting berth plan xml generation");

        let result = self
            .berth_information(records)
            .and_then(|berths| {
                render(&berths, start_date, end_date, generated_at).context(WriteSnafu)
            });

        match &result {
            Ok(_) => info!("berth plan xml generated"),
            Err(e) => error!("berth plan xml generation failed: {e}"),
        }

        result
    }

    /// Projects every record, failing on the first record with an invalid bollard reference.
    pub fn berth_information(
        &self,
        records: &[BerthRecord],
    ) -> Result<Vec<BerthInformation>, XmlGenerationError> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let metrics = self
                    .calculator
                    .get_metrics(
                        record.planned_bollard.as_deref().unwrap_or_default(),
                        record.loa(),
                        record.is_starboard_berth,
                    )
                    .context(MetricsSnafu {
                        index,
                        voyage: record.arrival_voyage.clone().unwrap_or_default(),
                    })?;

                if !metrics.is_real() {
                    debug!(
                        index,
                        voyage = record.arrival_voyage.as_deref(),
                        "no bollard planned, using mock metrics"
                    );
                }

                Ok(BerthInformation::new(record, metrics, self.agencies))
            })
            .collect()
    }
}

/// UTC timestamp with microseconds, the fraction is left out when it is zero.
fn generation_time(generated_at: DateTime<Utc>) -> String {
    if generated_at.timestamp_subsec_micros() == 0 {
        generated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    } else {
        generated_at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
    }
}

fn render(
    berths: &[BerthInformation],
    start_date: &str,
    end_date: &str,
    generated_at: DateTime<Utc>,
) -> Result<String, std::fmt::Error> {
    let mut w = XmlWriter::new();
    w.declaration()?;
    w.start(
        "soapenv:Envelope",
        &[
            ("xmlns:soapenv", SOAPENV_NAMESPACE),
            ("xmlns:tmsa", TMSA_NAMESPACE),
        ],
    )?;
    w.empty("soapenv:Header")?;
    w.start("soapenv:Body", &[])?;
    w.start("tmsa:processBerthPlan", &[])?;
    w.start("berthPlanRequest", &[])?;
    w.start("DemandeInitiale", &[])?;

    w.start("header", &[])?;
    w.element("msgVersion", MSG_VERSION)?;
    w.element("GenerationTime", &generation_time(generated_at))?;
    w.element("sender", SENDER)?;
    w.end()?;

    w.start("body", &[])?;
    w.element("startDate", &format_datetime(start_date))?;
    w.element("endDate", &format_datetime(end_date))?;
    if berths.is_empty() {
        w.empty("berths")?;
    } else {
        w.start("berths", &[])?;
        for berth in berths {
            berth.write(&mut w)?;
        }
        w.end()?;
    }
    w.end()?;

    // DemandeInitiale, berthPlanRequest, processBerthPlan, Body, Envelope
    for _ in 0..5 {
        w.end()?;
    }

    w.finish()
}
