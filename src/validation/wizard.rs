//! Promotion Wizard - Multi-step Create Flow
//!
//! Inputs are kept as the raw strings the user typed so that going back a
//! step never loses anything, even text that does not parse yet.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{FieldError, FieldErrors};
use crate::constants::{PROMO_CODE_MAX_LEN, PROMO_CODE_MIN_LEN};
use crate::domain::{DiscountKind, PromotionDraft};

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_-]+$").expect("code pattern is valid"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wizard steps in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Basics,
    Discount,
    Schedule,
    Review,
}

impl WizardStep {
    pub const ALL: &'static [WizardStep] = &[
        WizardStep::Basics,
        WizardStep::Discount,
        WizardStep::Schedule,
        WizardStep::Review,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Basics => 0,
            WizardStep::Discount => 1,
            WizardStep::Schedule => 2,
            WizardStep::Review => 3,
        }
    }

    fn next(self) -> Self {
        match self {
            WizardStep::Basics => WizardStep::Discount,
            WizardStep::Discount => WizardStep::Schedule,
            WizardStep::Schedule | WizardStep::Review => WizardStep::Review,
        }
    }

    fn previous(self) -> Self {
        match self {
            WizardStep::Basics | WizardStep::Discount => WizardStep::Basics,
            WizardStep::Schedule => WizardStep::Discount,
            WizardStep::Review => WizardStep::Schedule,
        }
    }
}

/// Uppercase, trimmed code
pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub(crate) fn check_code(code: &str, existing: &[&str]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let code = normalize_code(code);
    let len = code.chars().count();

    errors.require("codigo", &code);
    errors.check(
        !code.is_empty() && !(PROMO_CODE_MIN_LEN..=PROMO_CODE_MAX_LEN).contains(&len),
        "codigo",
        FieldError::new("validation-code-length")
            .arg("min", PROMO_CODE_MIN_LEN)
            .arg("max", PROMO_CODE_MAX_LEN),
    );
    errors.check(
        !code.is_empty() && !CODE_RE.is_match(&code),
        "codigo",
        "validation-code-chars",
    );
    errors.check(
        existing.iter().any(|c| normalize_code(c) == code),
        "codigo",
        "validation-promo-code-taken",
    );
    errors
}

pub(crate) fn check_discount(tipo: DiscountKind, valor: f64) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(
        !valor.is_finite() || valor <= 0.0,
        "valor",
        "validation-discount-positive",
    );
    errors.check(
        tipo == DiscountKind::Porcentaje && valor > 100.0,
        "valor",
        "validation-percent-max",
    );
    errors
}

pub(crate) fn check_schedule(
    start: NaiveDate,
    end: NaiveDate,
    max_uses: Option<i64>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(
        end < start,
        "fecha_fin",
        "validation-end-after-start",
    );
    errors.check(
        max_uses.is_some_and(|max| max < 1),
        "usos_maximos",
        "validation-max-uses",
    );
    errors
}

/// Create-promotion flow: Basics, Discount, Schedule, Review
#[derive(Debug, Clone)]
pub struct PromotionWizard {
    step: WizardStep,
    errors: FieldErrors,
    existing_codes: Vec<String>,

    pub codigo: String,
    pub descripcion: String,
    pub tipo: DiscountKind,
    pub valor: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    /// Blank means unlimited
    pub usos_maximos: String,
    pub activa: bool,
}

impl PromotionWizard {
    /// Start a wizard; `existing_codes` are the codes already taken
    pub fn new(existing_codes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            step: WizardStep::Basics,
            errors: FieldErrors::new(),
            existing_codes: existing_codes.into_iter().map(Into::into).collect(),
            codigo: String::new(),
            descripcion: String::new(),
            tipo: DiscountKind::default(),
            valor: String::new(),
            fecha_inicio: String::new(),
            fecha_fin: String::new(),
            usos_maximos: String::new(),
            activa: true,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Errors from the last `next`/`finish` attempt
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validate the current step and advance when it is clean
    pub fn next(&mut self) -> bool {
        self.errors = self.check_step(self.step);
        if !self.errors.is_empty() {
            tracing::debug!(step = ?self.step, errors = %self.errors, "Wizard step rejected");
            return false;
        }
        self.step = self.step.next();
        true
    }

    /// Go back one step, keeping every input
    pub fn back(&mut self) {
        self.errors = FieldErrors::new();
        self.step = self.step.previous();
    }

    /// Re-validate every step and build the draft.
    ///
    /// On failure the wizard jumps to the first step with an error.
    pub fn finish(&mut self) -> Result<PromotionDraft, FieldErrors> {
        for &step in &WizardStep::ALL[..WizardStep::Review.index()] {
            let errors = self.check_step(step);
            if !errors.is_empty() {
                self.step = step;
                self.errors = errors.clone();
                return Err(errors);
            }
        }
        self.errors = FieldErrors::new();

        let (fecha_inicio, fecha_fin) = match (parse_date(&self.fecha_inicio), parse_date(&self.fecha_fin)) {
            (Some(start), Some(end)) => (start, end),
            // check_step(Schedule) already rejected unparsable dates
            _ => return Err(self.check_step(WizardStep::Schedule)),
        };

        Ok(PromotionDraft {
            codigo: normalize_code(&self.codigo),
            descripcion: self.descripcion.trim().to_string(),
            tipo: self.tipo,
            valor: self.valor.trim().parse().unwrap_or_default(),
            fecha_inicio,
            fecha_fin,
            usos_maximos: parse_uses(&self.usos_maximos).ok().flatten(),
            activa: self.activa,
        })
    }

    fn check_step(&self, step: WizardStep) -> FieldErrors {
        match step {
            WizardStep::Basics => {
                let codes: Vec<&str> = self.existing_codes.iter().map(String::as_str).collect();
                check_code(&self.codigo, &codes)
            }
            WizardStep::Discount => match self.valor.trim().parse::<f64>() {
                Ok(valor) => check_discount(self.tipo, valor),
                Err(_) => {
                    let mut errors = FieldErrors::new();
                    errors.require("valor", &self.valor);
                    errors.add("valor", "validation-number");
                    errors
                }
            },
            WizardStep::Schedule => {
                let mut errors = FieldErrors::new();
                let start = parse_date(&self.fecha_inicio);
                let end = parse_date(&self.fecha_fin);
                let uses = parse_uses(&self.usos_maximos);
                errors.check(start.is_none(), "fecha_inicio", "validation-date");
                errors.check(end.is_none(), "fecha_fin", "validation-date");
                errors.check(uses.is_err(), "usos_maximos", "validation-integer");
                if let (Some(start), Some(end), Ok(uses)) = (start, end, uses) {
                    errors.merge(check_schedule(start, end, uses));
                }
                errors
            }
            WizardStep::Review => FieldErrors::new(),
        }
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

fn parse_uses(input: &str) -> Result<Option<i64>, std::num::ParseIntError> {
    let input = input.trim();
    if input.is_empty() {
        Ok(None)
    } else {
        input.parse().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PromotionWizard {
        let mut wizard = PromotionWizard::new(["FERRE10"]);
        wizard.codigo = " verano25 ".into();
        wizard.valor = "25".into();
        wizard.fecha_inicio = "2026-12-01".into();
        wizard.fecha_fin = "2026-12-31".into();
        wizard
    }

    #[test]
    fn walks_all_steps_and_uppercases_code() {
        let mut wizard = filled();
        assert!(wizard.next());
        assert!(wizard.next());
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::Review);

        let draft = wizard.finish().unwrap();
        assert_eq!(draft.codigo, "VERANO25");
        assert_eq!(draft.valor, 25.0);
        assert_eq!(draft.usos_maximos, None);
    }

    #[test]
    fn refuses_to_advance_on_duplicate_code() {
        let mut wizard = filled();
        wizard.codigo = "ferre10".into();
        assert!(!wizard.next());
        assert_eq!(wizard.step(), WizardStep::Basics);
        assert!(wizard.errors().contains("codigo"));
    }

    #[test]
    fn percentage_is_capped() {
        let mut wizard = filled();
        wizard.valor = "120".into();
        assert!(wizard.next());
        assert!(!wizard.next());
        assert_eq!(wizard.step(), WizardStep::Discount);

        wizard.tipo = DiscountKind::MontoFijo;
        assert!(wizard.next());
    }

    #[test]
    fn back_keeps_inputs() {
        let mut wizard = filled();
        wizard.next();
        wizard.valor = "abc".into();
        assert!(!wizard.next());
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::Basics);
        assert_eq!(wizard.valor, "abc");
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn finish_revalidates_and_jumps_to_failing_step() {
        let mut wizard = filled();
        wizard.next();
        wizard.next();
        wizard.next();
        wizard.fecha_fin = "2026-11-01".into();

        let errors = wizard.finish().unwrap_err();
        assert!(errors.contains("fecha_fin"));
        assert_eq!(wizard.step(), WizardStep::Schedule);
    }

    #[test]
    fn usage_cap_must_be_positive_integer() {
        let mut wizard = filled();
        wizard.next();
        wizard.next();
        wizard.usos_maximos = "0".into();
        assert!(!wizard.next());
        wizard.usos_maximos = "dos".into();
        assert!(!wizard.next());
        wizard.usos_maximos = "50".into();
        assert!(wizard.next());
    }
}
