//! Medical Synonym Expansion
//!
//! Broadens a normalized query with medical synonyms (a curated phrase
//! table) and general-language synonyms (the lexical database), so that
//! candidate filtering sees the many ways a customer names the same thing.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::lexicon::LexicalDatabase;
use crate::core::error::{Result, SearchError};

/// Canonical phrase and the terms it expands to, in match order.
const MEDICAL_SYNONYMS: &[(&str, &[&str])] = &[
    ("head hurt", &["headache", "migraine", "cephalalgia"]),
    ("pain relief", &["analgesic", "painkiller", "pain relief", "pain reliever"]),
    ("stomach ache", &["abdominal pain", "stomach pain", "gastric pain", "belly ache"]),
    ("fever", &["pyrexia", "high temperature", "febrile", "feverishness"]),
    ("cold", &["common cold", "upper respiratory infection", "nasopharyngitis"]),
    ("cough", &["tussis", "dry cough", "productive cough"]),
    ("sore throat", &["pharyngitis", "throat pain", "throat irritation"]),
    ("runny nose", &["rhinorrhea", "nasal discharge"]),
    ("heartburn", &["acid reflux", "gastroesophageal reflux", "GERD"]),
    ("nausea", &["queasiness", "sickness", "upset stomach"]),
    ("vomiting", &["emesis", "throwing up"]),
    ("diarrhea", &["loose stools", "frequent bowel movements", "dysentery"]),
    ("constipation", &["infrequent bowel movements", "difficulty passing stools"]),
    ("back pain", &["lumbago", "lower back pain", "spinal discomfort"]),
    ("joint pain", &["arthralgia", "joint discomfort", "joint stiffness"]),
    ("muscle pain", &["myalgia", "muscle ache", "muscle soreness"]),
    ("dizziness", &["vertigo", "lightheadedness", "faintness"]),
    ("allergies", &["hypersensitivity", "allergic reaction"]),
    ("rash", &["dermatitis", "skin irritation", "hives", "urticaria"]),
    ("fatigue", &["tiredness", "exhaustion", "lethargy"]),
    ("insomnia", &["sleeplessness", "difficulty sleeping", "sleep disorder"]),
    ("anxiety", &["nervousness", "worry", "anxiety disorder"]),
    ("depression", &["low mood", "clinical depression", "major depressive disorder"]),
    ("high blood pressure", &["hypertension", "elevated blood pressure"]),
    ("low blood pressure", &["hypotension", "low BP"]),
    ("diabetes", &["high blood sugar", "hyperglycemia", "diabetic condition"]),
    ("obesity", &["overweight", "excess weight", "adiposity"]),
    ("infection", &["bacterial infection", "viral infection", "fungal infection"]),
    ("asthma", &["bronchial asthma", "reactive airway disease"]),
    ("arthritis", &["joint inflammation", "rheumatoid arthritis", "osteoarthritis"]),
    ("allergic rhinitis", &["hay fever", "nasal allergies"]),
    ("high cholesterol", &["hypercholesterolemia", "elevated cholesterol"]),
    ("flu", &["influenza", "viral flu"]),
    ("heart attack", &["myocardial infarction", "cardiac arrest"]),
    ("stroke", &["cerebrovascular accident", "brain attack"]),
    ("cancer", &["malignancy", "tumor", "neoplasm"]),
    ("kidney stones", &["renal calculi", "nephrolithiasis"]),
    ("urinary tract infection", &["UTI", "bladder infection", "cystitis"]),
    ("skin infection", &["cellulitis", "dermal infection"]),
    ("bronchitis", &["chest cold", "bronchial infection"]),
    ("pneumonia", &["lung infection", "pulmonary infection"]),
    ("anemia", &["low hemoglobin", "iron deficiency", "blood deficiency"]),
    ("thyroid disorder", &["hypothyroidism", "hyperthyroidism", "thyroid disease"]),
    ("menstrual pain", &["dysmenorrhea", "period pain", "menstrual cramps"]),
    ("birth control", &["contraception", "family planning", "contraceptive"]),
    ("pregnancy", &["gestation", "expecting", "carrying a child"]),
    ("asthma attack", &["bronchospasm", "acute asthma exacerbation"]),
    ("eczema", &["atopic dermatitis", "chronic skin inflammation"]),
    ("acne", &["pimples", "zits", "acne vulgaris"]),
    ("diabetic neuropathy", &["nerve pain in diabetes", "diabetic nerve damage"]),
    ("COPD", &["chronic obstructive pulmonary disease", "chronic bronchitis", "emphysema"]),
    ("gout", &["gouty arthritis", "uric acid crystals", "joint inflammation due to gout"]),
    ("osteoporosis", &["bone loss", "reduced bone density", "brittle bones"]),
    ("glaucoma", &["eye pressure", "optic nerve damage", "eye disease"]),
    ("cataract", &["cloudy lens", "lens opacity", "eye cataract"]),
    ("migraine", &["severe headache", "migraine attack", "vascular headache"]),
    ("food poisoning", &["gastroenteritis", "stomach bug", "foodborne illness"]),
    ("autism", &["autism spectrum disorder", "ASD"]),
    ("alzheimer", &["alzheimer’s disease", "dementia", "memory loss"]),
    ("parkinson", &["parkinson’s disease", "PD", "neurodegenerative disorder"]),
    ("epilepsy", &["seizure disorder", "convulsive disorder"]),
    ("bipolar disorder", &["manic depression", "bipolar affective disorder"]),
    ("schizophrenia", &["psychotic disorder", "schizoaffective disorder"]),
    ("irritable bowel syndrome", &["IBS", "spastic colon", "irritable colon"]),
    ("liver disease", &["hepatic disease", "cirrhosis", "hepatitis"]),
    ("ulcer", &["peptic ulcer", "gastric ulcer", "stomach ulcer"]),
    ("herpes", &["herpes simplex", "HSV", "cold sores", "genital herpes"]),
    ("HIV", &["human immunodeficiency virus", "AIDS virus", "HIV infection"]),
    ("malaria", &["plasmodium infection", "mosquito-borne disease"]),
    ("tuberculosis", &["TB", "mycobacterium tuberculosis infection"]),
    ("arthritis pain", &["joint pain", "arthralgia", "inflammation pain"]),
    ("ringworm", &["tinea", "fungal skin infection"]),
    ("warts", &["verrucae", "HPV warts", "skin growth"]),
    ("ear infection", &["otitis media", "otitis externa", "earache"]),
    ("allergy", &["hypersensitivity", "allergic response", "immune reaction"]),
    ("antibiotic", &["antibacterial", "antimicrobial", "infection treatment"]),
    ("painkiller", &["analgesic", "pain reliever", "pain relief medication"]),
    ("antiviral", &["virus treatment", "viral infection medication"]),
    ("antifungal", &["fungus treatment", "fungal infection medication"]),
    ("antidepressant", &["depression treatment", "mood stabilizer", "SSRI"]),
];

/// Ordered phrase table. Earlier phrases are matched (and removed from the
/// query) before later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Deserialize)]
struct SynonymFile {
    #[serde(default)]
    synonym: Vec<SynonymEntry>,
}

#[derive(Debug, Deserialize)]
struct SynonymEntry {
    phrase: String,
    synonyms: Vec<String>,
}

impl SynonymTable {
    /// Built-in pharmacy table covering common symptoms, conditions and
    /// drug classes.
    pub fn medical() -> Self {
        let mut table = Self::default();
        for (phrase, synonyms) in MEDICAL_SYNONYMS {
            table.insert(phrase, synonyms.iter().map(|s| s.to_string()).collect());
        }
        table
    }

    /// Add synonyms for a phrase. Known phrases keep their position and gain
    /// the new terms; new phrases go to the end. Blank phrases are ignored.
    pub fn insert(&mut self, phrase: &str, synonyms: Vec<String>) {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(p, _)| p == phrase) {
            Some((_, existing)) => {
                for synonym in synonyms {
                    if !existing.contains(&synonym) {
                        existing.push(synonym);
                    }
                }
            }
            None => self.entries.push((phrase.to_string(), synonyms)),
        }
    }

    /// Merge entries from a TOML document:
    ///
    /// ```toml
    /// [[synonym]]
    /// phrase = "sore throat"
    /// synonyms = ["pharyngitis", "throat pain"]
    /// ```
    pub fn merge_toml(&mut self, contents: &str) -> Result<usize> {
        let file: SynonymFile = toml::from_str(contents)?;
        let count = file.synonym.len();
        for entry in file.synonym {
            self.insert(&entry.phrase, entry.synonyms);
        }
        Ok(count)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<usize> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {e}", path.display())))?;
        let count = self.merge_toml(&contents)?;
        log::info!("Merged {} synonym entries from {}", count, path.display());
        Ok(count)
    }

    pub fn get(&self, phrase: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(p, _)| p == phrase)
            .map(|(_, synonyms)| synonyms.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(phrase, synonyms)| (phrase.as_str(), synonyms.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Expands normalized queries through the phrase table, then the lexical
/// database.
pub struct SynonymExpander {
    table: SynonymTable,
    lexicon: Arc<dyn LexicalDatabase>,
    enabled: bool,
}

impl SynonymExpander {
    pub fn new(table: SynonymTable, lexicon: Arc<dyn LexicalDatabase>) -> Self {
        Self {
            table,
            lexicon,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn table(&self) -> &SynonymTable {
        &self.table
    }

    /// Expand a normalized query into a space-joined set of search terms.
    ///
    /// Phrases match as substrings of the lowercased query, not on token
    /// boundaries, and each matched phrase is cut out before the remaining
    /// words are looked up in the lexical database. When nothing matches at
    /// all the remaining words are returned as they are.
    pub fn expand(&self, query: &str) -> String {
        let mut remaining = query.to_lowercase();
        if !self.enabled {
            return remaining.split_whitespace().collect::<Vec<_>>().join(" ");
        }

        let mut terms = BTreeSet::new();
        for (phrase, synonyms) in self.table.iter() {
            let phrase = phrase.to_lowercase();
            if remaining.contains(&phrase) {
                terms.extend(synonyms.iter().cloned());
                remaining = remaining.replace(&phrase, "");
            }
        }

        let words: Vec<&str> = remaining.split_whitespace().collect();
        for word in &words {
            terms.extend(self.lexicon.synonyms(word));
        }

        if terms.is_empty() {
            return words.join(" ");
        }
        terms.into_iter().collect::<Vec<_>>().join(" ")
    }
}

impl std::fmt::Debug for SynonymExpander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynonymExpander")
            .field("phrases", &self.table.len())
            .field("enabled", &self.enabled)
            .finish()
    }
}
