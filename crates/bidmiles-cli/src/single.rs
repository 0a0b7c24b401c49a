//! `single`: one launcher/receiver pair typed on the command line.

use bidmiles_core::{
    DistanceResult, GeoPoint, MileageAggregator, MileageRecord, RecordInput, RegionProvider,
    RoutingProvider,
};

/// Runs one record through the pipeline and prints the outcome.
///
/// # Errors
///
/// Returns an error if either coordinate failed to parse or either distance
/// could not be resolved, after printing the reason for each.
pub(crate) async fn run_single<P>(
    aggregator: &MileageAggregator<P>,
    launcher: String,
    receiver: String,
) -> anyhow::Result<()>
where
    P: RoutingProvider + RegionProvider,
{
    let record = aggregator
        .process(RecordInput::new(launcher, receiver))
        .await;

    for line in describe(&record) {
        println!("{line}");
    }

    if record.is_resolved() {
        return Ok(());
    }
    for issue in &record.issues {
        eprintln!("error: {issue}");
    }
    anyhow::bail!("could not calculate one or both distances")
}

/// Human-readable lines for a record, one per endpoint plus totals.
fn describe(record: &MileageRecord) -> Vec<String> {
    let mut lines = vec![
        endpoint_line(
            "Launcher",
            record.launcher,
            record.distance_to_launcher,
            record.launcher_region.as_deref(),
        ),
        endpoint_line(
            "Receiver",
            record.receiver,
            record.distance_to_receiver,
            record.receiver_region.as_deref(),
        ),
    ];

    if let DistanceResult::Miles(miles) = record.furthest {
        lines.push(format!("Furthest distance from office: {miles:.2} miles"));
        if let Some(DistanceResult::Miles(total)) = record.total_mileage {
            lines.push(format!("Total mileage: {total:.2} miles"));
        }
    }
    lines
}

fn endpoint_line(
    name: &str,
    point: Option<GeoPoint>,
    distance: DistanceResult,
    region: Option<&str>,
) -> String {
    let point = point.map_or_else(|| "invalid coordinates".to_string(), |p| p.to_string());
    let region = region.map(|r| format!(" [{r}]")).unwrap_or_default();
    format!("{name}: {point}{region} -> {distance}")
}

#[cfg(test)]
mod tests {
    use bidmiles_core::{Endpoint, ParseError, RecordIssue};

    use super::*;

    fn record() -> MileageRecord {
        MileageRecord {
            label: None,
            launcher_text: "45.5, -118.4".to_owned(),
            receiver_text: "45.9, -119.4".to_owned(),
            launcher: GeoPoint::new(45.5, -118.4).ok(),
            receiver: GeoPoint::new(45.9, -119.4).ok(),
            distance_to_launcher: DistanceResult::Miles(12.34),
            distance_to_receiver: DistanceResult::Miles(9.01),
            furthest: DistanceResult::Miles(12.34),
            launcher_region: None,
            receiver_region: None,
            total_mileage: Some(DistanceResult::Miles(37.02)),
            issues: Vec::new(),
        }
    }

    #[test]
    fn describe_resolved_record() {
        let lines = describe(&record());
        assert_eq!(
            lines,
            [
                "Launcher: 45.5, -118.4 -> 12.34",
                "Receiver: 45.9, -119.4 -> 9.01",
                "Furthest distance from office: 12.34 miles",
                "Total mileage: 37.02 miles",
            ]
        );
    }

    #[test]
    fn describe_includes_regions_when_present() {
        let mut r = record();
        r.launcher_region = Some("Oregon".to_owned());
        assert_eq!(describe(&r)[0], "Launcher: 45.5, -118.4 [Oregon] -> 12.34");
    }

    #[test]
    fn describe_unresolved_record_omits_totals() {
        let mut r = record();
        r.launcher = None;
        r.distance_to_launcher = DistanceResult::Unresolved;
        r.furthest = DistanceResult::Unresolved;
        r.total_mileage = Some(DistanceResult::Unresolved);
        r.issues = vec![RecordIssue::Parse {
            endpoint: Endpoint::Launcher,
            error: ParseError::InsufficientTokens { found: 1 },
        }];

        let lines = describe(&r);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Launcher: invalid coordinates -> unresolved");
    }
}
