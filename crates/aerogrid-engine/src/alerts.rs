//! Stakeholder alert rules keyed on the composite AQI.
//!
//! Rules only decide who should be told and how urgently; delivering the
//! message is left to the caller.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Warning,
    Danger,
    Critical,
}

/// Audience an alert is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stakeholder {
    HealthSensitive,
    SchoolAdmin,
    GeneralPublic,
    EmergencyResponse,
}

impl Stakeholder {
    fn message(self, aqi: u32) -> String {
        match self {
            Stakeholder::HealthSensitive => format!(
                "Air quality alert: AQI {aqi}. Sensitive groups should limit outdoor activities."
            ),
            Stakeholder::SchoolAdmin => format!(
                "Air quality warning: AQI {aqi}. Consider limiting outdoor activities for students."
            ),
            Stakeholder::GeneralPublic => format!(
                "Unhealthy air quality: AQI {aqi}. Everyone should avoid prolonged outdoor activities."
            ),
            Stakeholder::EmergencyResponse => format!(
                "Critical air quality: AQI {aqi}. Emergency response protocols may be needed."
            ),
        }
    }
}

/// Fires when the composite AQI is at or above `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertRule {
    pub threshold: u32,
    pub stakeholder: Stakeholder,
    pub level: AlertLevel,
}

pub const STANDARD_RULES: [AlertRule; 4] = [
    AlertRule {
        threshold: 50,
        stakeholder: Stakeholder::HealthSensitive,
        level: AlertLevel::Warning,
    },
    AlertRule {
        threshold: 100,
        stakeholder: Stakeholder::SchoolAdmin,
        level: AlertLevel::Warning,
    },
    AlertRule {
        threshold: 150,
        stakeholder: Stakeholder::GeneralPublic,
        level: AlertLevel::Danger,
    },
    AlertRule {
        threshold: 200,
        stakeholder: Stakeholder::EmergencyResponse,
        level: AlertLevel::Critical,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub stakeholder: Stakeholder,
    pub level: AlertLevel,
    pub threshold: u32,
    pub aqi: u32,
    pub message: String,
}

/// Alerts raised by [`STANDARD_RULES`] for `aqi`, lowest threshold first.
#[must_use]
pub fn evaluate(aqi: u32) -> Vec<Alert> {
    evaluate_with(&STANDARD_RULES, aqi)
}

/// Alerts raised by `rules` for `aqi`, in rule order.
#[must_use]
pub fn evaluate_with(rules: &[AlertRule], aqi: u32) -> Vec<Alert> {
    let alerts: Vec<Alert> = rules
        .iter()
        .filter(|rule| aqi >= rule.threshold)
        .map(|rule| Alert {
            stakeholder: rule.stakeholder,
            level: rule.level,
            threshold: rule.threshold,
            aqi,
            message: rule.stakeholder.message(aqi),
        })
        .collect();

    if !alerts.is_empty() {
        tracing::debug!(aqi, triggered = alerts.len(), "alert rules triggered");
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_edges_trigger_expected_rule_counts() {
        let cases = [
            (0, 0),
            (49, 0),
            (50, 1),
            (99, 1),
            (100, 2),
            (150, 3),
            (199, 3),
            (200, 4),
            (500, 4),
        ];
        for (aqi, expected) in cases {
            assert_eq!(evaluate(aqi).len(), expected, "aqi {aqi}");
        }
    }

    #[test]
    fn alerts_escalate_in_rule_order() {
        let alerts = evaluate(210);
        let stakeholders: Vec<Stakeholder> = alerts.iter().map(|a| a.stakeholder).collect();
        assert_eq!(
            stakeholders,
            [
                Stakeholder::HealthSensitive,
                Stakeholder::SchoolAdmin,
                Stakeholder::GeneralPublic,
                Stakeholder::EmergencyResponse,
            ]
        );
        assert_eq!(alerts[2].level, AlertLevel::Danger);
        assert_eq!(alerts[3].level, AlertLevel::Critical);
        assert!(alerts.iter().all(|a| a.aqi == 210));
    }

    #[test]
    fn message_carries_the_index() {
        let alerts = evaluate(57);
        assert_eq!(
            alerts[0].message,
            "Air quality alert: AQI 57. Sensitive groups should limit outdoor activities."
        );
    }

    #[test]
    fn custom_rules_are_honoured() {
        let rules = [AlertRule {
            threshold: 10,
            stakeholder: Stakeholder::SchoolAdmin,
            level: AlertLevel::Danger,
        }];
        assert!(evaluate_with(&rules, 9).is_empty());
        assert_eq!(evaluate_with(&rules, 10)[0].level, AlertLevel::Danger);
    }

    #[test]
    fn alert_serializes_snake_case() {
        let json = serde_json::to_value(&evaluate(160)[2]).unwrap();
        assert_eq!(json["stakeholder"], "general_public");
        assert_eq!(json["level"], "danger");
        assert_eq!(json["threshold"], 150);
    }
}
