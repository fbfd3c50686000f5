use crate::checks;
use crate::finding::{Finding, Severity, ValidationReport};
use serde_sarif::sarif::{
    ArtifactLocation, Location, Message, MultiformatMessageString, PhysicalLocation, Region,
    ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, Tool, ToolComponent,
};
use std::collections::{BTreeSet, HashMap};

pub fn format(report: &ValidationReport) -> String {
    let findings: Vec<&Finding> = report.findings().collect();

    // Only categories that actually occur, described from the rule catalogue.
    let catalogue: HashMap<&str, checks::RuleInfo> =
        checks::all_rules().into_iter().map(|r| (r.id, r)).collect();
    let rule_ids: Vec<&str> = findings
        .iter()
        .map(|f| f.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rule_index: HashMap<&str, i64> = rule_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i as i64))
        .collect();

    let rules: Vec<ReportingDescriptor> = rule_ids
        .iter()
        .map(|id| {
            let mut rule = ReportingDescriptor::builder().id(id.to_string()).build();
            if let Some(info) = catalogue.get(id) {
                rule.short_description = Some(
                    MultiformatMessageString::builder()
                        .text(info.message.to_string())
                        .build(),
                );
                rule.help = Some(
                    MultiformatMessageString::builder()
                        .text(info.remediation.to_string())
                        .build(),
                );
            }
            rule
        })
        .collect();

    let results: Vec<SarifResult> = findings
        .iter()
        .map(|f| {
            let level = match f.severity {
                Severity::Critical | Severity::Major => ResultLevel::Error,
                Severity::Warning => ResultLevel::Warning,
                Severity::Info => ResultLevel::Note,
            };

            let mut result = SarifResult::builder()
                .message(Message::builder().text(f.message.clone()).build())
                .build();

            result.rule_id = Some(f.category.clone());
            result.level = Some(level);
            result.rule_index = rule_index.get(f.category.as_str()).copied();

            if let Some(file) = f.file() {
                let mut location = Location::builder().build();
                let mut physical = PhysicalLocation::builder().build();

                physical.artifact_location =
                    Some(ArtifactLocation::builder().uri(file.to_string()).build());

                if let Some(line) = f.details.get("line").and_then(|l| l.as_i64()) {
                    physical.region = Some(Region::builder().start_line(line).build());
                }

                location.physical_location = Some(physical);
                result.locations = Some(vec![location]);
            }

            result
        })
        .collect();

    let driver = ToolComponent::builder()
        .name("oxidized-skill-lint")
        .version(env!("CARGO_PKG_VERSION").to_string())
        .rules(rules)
        .build();

    let tool = Tool::builder().driver(driver).build();

    let run = Run::builder().tool(tool).results(results).build();

    let sarif = Sarif::builder().version("2.1.0").runs(vec![run]).build();

    serde_json::to_string_pretty(&sarif)
        .unwrap_or_else(|e| super::serialization_error("SARIF", &e))
}
