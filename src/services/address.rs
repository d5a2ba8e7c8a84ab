use crate::domain::constants::DETAIL_SEGMENT;
use crate::domain::error::CheckError;
use crate::domain::models::RecordId;

/// Pull the record id out of a catalogue detail-page address.
///
/// Everything after the first `?` is discarded, then the id is whatever
/// follows the first `/detail/` marker.
pub fn extract_record_id(address: &str) -> Result<RecordId, CheckError> {
    if !address.contains(DETAIL_SEGMENT) {
        return Err(CheckError::InvalidAddress(format!(
            "address must contain '{}': {}",
            DETAIL_SEGMENT, address
        )));
    }
    let without_query = address.split('?').next().unwrap_or_default();
    let id = without_query
        .find(DETAIL_SEGMENT)
        .map(|at| &without_query[at + DETAIL_SEGMENT.len()..])
        .unwrap_or_default();
    if id.is_empty() {
        return Err(CheckError::InvalidAddress(format!(
            "no record identifier in address: {}",
            address
        )));
    }
    Ok(RecordId::new(id))
}
