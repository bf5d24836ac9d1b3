//! Recommendation generator
//!
//! Produces the ordered action list for a report. Crisis handling always comes
//! first and general self-care always comes last; the items in between depend on
//! whether the diagnostic threshold was met.

use crate::diagnosis::types::{DiagnosisResult, Priority, Recommendation, RecommendationKind, SeverityResult};
use crate::criteria::SeverityLevel;

/// Detected-symptom count at which a sub-threshold result still warrants monitoring
pub const MONITORING_MIN_COUNT: usize = 3;

const CRISIS_MESSAGE: &str =
    "URGENT: Suicidal ideation detected. Immediate professional intervention recommended.";
const CRISIS_RESOURCES: [&str; 3] = [
    "National Suicide Prevention Lifeline: 988",
    "Crisis Text Line: Text HOME to 741741",
    "Emergency Services: 911",
];

const EVALUATION_MESSAGE: &str =
    "Criteria for Major Depressive Disorder are met. Strongly recommend professional psychiatric evaluation.";
const EVALUATION_STEPS: [&str; 3] = [
    "Schedule appointment with a mental health professional",
    "Consider bringing this assessment to your appointment",
    "Discuss treatment options (therapy, medication, or both)",
];

const URGENT_MESSAGE: &str =
    "Severe symptoms or significant functional impairment detected. Consider urgent evaluation.";

const MONITORING_MESSAGE: &str = "Some depressive symptoms detected but full criteria not met. Monitor symptoms and consider professional consultation.";
const MONITORING_STEPS: [&str; 4] = [
    "Track symptoms over the next 2 weeks",
    "Maintain self-care routines (sleep, nutrition, exercise)",
    "Seek support from friends, family, or counselor",
    "Consider professional evaluation if symptoms worsen",
];

const SELF_CARE_MESSAGE: &str = "General mental health recommendations";
const SELF_CARE_SUGGESTIONS: [&str; 5] = [
    "Maintain regular sleep schedule",
    "Engage in physical activity",
    "Stay connected with supportive people",
    "Practice stress management techniques",
    "Avoid alcohol and substance use",
];

fn owned(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

fn item(priority: Priority, kind: RecommendationKind, message: &str) -> Recommendation {
    Recommendation {
        priority,
        kind,
        message: message.to_string(),
        resources: None,
        next_steps: None,
        suggestions: None,
    }
}

/// Generate the ordered recommendation list
pub fn generate(diagnosis: &DiagnosisResult, severity: &SeverityResult) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(4);

    if diagnosis.crisis_detected {
        recommendations.push(Recommendation {
            resources: owned(&CRISIS_RESOURCES),
            ..item(Priority::Critical, RecommendationKind::CrisisIntervention, CRISIS_MESSAGE)
        });
    }

    if diagnosis.meets_threshold {
        recommendations.push(Recommendation {
            next_steps: owned(&EVALUATION_STEPS),
            ..item(Priority::High, RecommendationKind::ProfessionalEvaluation, EVALUATION_MESSAGE)
        });

        if severity.level == SeverityLevel::Severe || severity.functional_impairment {
            recommendations.push(item(Priority::High, RecommendationKind::UrgentCare, URGENT_MESSAGE));
        }
    } else if diagnosis.criteria_met_count >= MONITORING_MIN_COUNT {
        recommendations.push(Recommendation {
            next_steps: owned(&MONITORING_STEPS),
            ..item(Priority::Moderate, RecommendationKind::Monitoring, MONITORING_MESSAGE)
        });
    }

    recommendations.push(Recommendation {
        suggestions: owned(&SELF_CARE_SUGGESTIONS),
        ..item(Priority::General, RecommendationKind::SelfCare, SELF_CARE_MESSAGE)
    });

    recommendations
}
