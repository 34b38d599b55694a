use snafu::ResultExt;

use crate::{
    SOAPENV_NAMESPACE, TMSA_NAMESPACE, error::XmlGenerationError,
    xml_generation_error::WriteSnafu, xml_writer::XmlWriter,
};

/// Wraps a pre-rendered `TerminalComercialOperation` fragment in the `processETC` SOAP envelope.
///
/// The fragment comes straight from the operational database. It is embedded unescaped with only
/// surrounding whitespace trimmed.
pub fn etc_envelope(fragment: &str) -> Result<String, XmlGenerationError> {
    let mut w = XmlWriter::new();
    let write = |w: &mut XmlWriter| -> std::fmt::Result {
        w.start(
            "soapenv:Envelope",
            &[
                ("xmlns:soapenv", SOAPENV_NAMESPACE),
                ("xmlns:tmsa", TMSA_NAMESPACE),
            ],
        )?;
        w.empty("soapenv:Header")?;
        w.start("soapenv:Body", &[])?;
        w.start("tmsa:processETC", &[])?;
        w.start("ETC", &[])?;
        w.raw(fragment)?;
        w.end()?;
        w.end()?;
        w.end()?;
        w.end()
    };

    write(&mut w).context(WriteSnafu)?;
    w.finish().context(WriteSnafu)
}
