//! DSM-5 Major Depressive Disorder criteria

use super::{CriteriaDefinition, Criterion, SeverityBand, SeverityLevel};

/// Code of the crisis-relevant criterion (suicidal ideation)
pub const CRISIS_CODE: &str = "A9";

/// Code of the depressed-mood core criterion
pub const DEPRESSED_MOOD_CODE: &str = "A1";

/// Code of the anhedonia core criterion
pub const ANHEDONIA_CODE: &str = "A2";

const CRITERIA: [Criterion; 9] = [
    Criterion {
        code: "A1",
        symptom_id: "depressed_mood",
        name: "Depressed mood most of the day, nearly every day",
        crisis: false,
    },
    Criterion {
        code: "A2",
        symptom_id: "anhedonia",
        name: "Markedly diminished interest or pleasure in all, or almost all, activities",
        crisis: false,
    },
    Criterion {
        code: "A3",
        symptom_id: "weight_change",
        name: "Significant weight loss or gain, or decrease/increase in appetite",
        crisis: false,
    },
    Criterion {
        code: "A4",
        symptom_id: "sleep_disturbance",
        name: "Insomnia or hypersomnia nearly every day",
        crisis: false,
    },
    Criterion {
        code: "A5",
        symptom_id: "psychomotor",
        name: "Psychomotor agitation or retardation (observable by others)",
        crisis: false,
    },
    Criterion {
        code: "A6",
        symptom_id: "fatigue",
        name: "Fatigue or loss of energy nearly every day",
        crisis: false,
    },
    Criterion {
        code: "A7",
        symptom_id: "worthlessness",
        name: "Feelings of worthlessness or excessive/inappropriate guilt",
        crisis: false,
    },
    Criterion {
        code: "A8",
        symptom_id: "concentration",
        name: "Diminished ability to think or concentrate, or indecisiveness",
        crisis: false,
    },
    Criterion {
        code: CRISIS_CODE,
        symptom_id: "suicidal_ideation",
        name: "Recurrent thoughts of death, suicidal ideation, or suicide attempt",
        crisis: true,
    },
];

const SEVERITY_BANDS: [SeverityBand; 4] = [
    SeverityBand {
        level: SeverityLevel::Subthreshold,
        min: 0,
        max: 4,
        description: "Fewer than 5 symptoms, does not meet diagnostic threshold for Major Depressive Disorder",
    },
    SeverityBand {
        level: SeverityLevel::Mild,
        min: 5,
        max: 6,
        description: "Few symptoms in excess of those required, and symptoms result in minor impairment in functioning",
    },
    SeverityBand {
        level: SeverityLevel::Moderate,
        min: 7,
        max: 8,
        description: "Symptom severity or functional impairment is between mild and severe",
    },
    SeverityBand {
        level: SeverityLevel::Severe,
        min: 9,
        max: 9,
        description: "Number of symptoms substantially exceeds what is required, and symptoms seriously interfere with functioning",
    },
];

const EXCLUSION_CRITERIA: [&str; 3] = [
    "Symptoms are not attributable to the physiological effects of a substance or another medical condition",
    "The episode is not better explained by schizoaffective disorder, schizophrenia, or other psychotic disorders",
    "There has never been a manic episode or a hypomanic episode",
];

/// The Major Depressive Disorder criteria table
pub static MDD_CRITERIA: CriteriaDefinition = CriteriaDefinition {
    id: "mdd",
    name: "Major Depressive Disorder",
    code: "F32.x / F33.x",
    required_symptom_count: 5,
    required_duration_days: 14,
    core_codes: &[DEPRESSED_MOOD_CODE, ANHEDONIA_CODE],
    criteria: &CRITERIA,
    severity_bands: &SEVERITY_BANDS,
    exclusion_criteria: &EXCLUSION_CRITERIA,
};
