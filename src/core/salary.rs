//! Static public-sector salary reference data.
//!
//! Figures are monthly amounts in BRL unless a currency says otherwise. They are fixed
//! configuration, loaded once and never mutated.

use crate::core::convert::{ConversionError, convert};
use crate::core::rate::RateSnapshot;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;
use std::sync::LazyLock;
use tracing::warn;

/// Constitutional ceiling for public pay (CF Art. 37, XI).
pub const CONSTITUTIONAL_CEILING: Decimal = Decimal::from_parts(4_636_619, 0, 0, false, 2);

/// Yearly cost of pay above the ceiling.
pub const SUPERSALARY_ANNUAL_COST: Decimal = Decimal::from_parts(2_820_130_816, 4, 0, false, 0);

pub const SERVANTS_ABOVE_CEILING: u32 = 53_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Category {
    Essential,
    Security,
    Justice,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Category::Essential => "essential",
                Category::Security => "security",
                Category::Justice => "justice",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RiskLevel::Low => "low",
                RiskLevel::Medium => "medium",
                RiskLevel::High => "high",
                RiskLevel::VeryHigh => "very high",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CareerData {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub salary_base: Decimal,
    /// Average real pay including allowances.
    pub salary_real: Decimal,
    pub salary_max: Decimal,
    pub allowances: Decimal,
    pub source: &'static str,
    pub source_url: &'static str,
    pub education: &'static str,
    pub weekly_hours: u8,
    pub risk_level: RiskLevel,
    pub color: &'static str,
}

impl CareerData {
    pub fn exceeds_ceiling(&self) -> bool {
        self.salary_real > CONSTITUTIONAL_CEILING
    }

    /// How many times the ceiling the real pay is, to 1 decimal place.
    pub fn ceiling_multiple(&self) -> Decimal {
        round_ratio(self.salary_real / CONSTITUTIONAL_CEILING)
    }

    /// Real pay above the ceiling, zero when within it.
    pub fn amount_above_ceiling(&self) -> Decimal {
        (self.salary_real - CONSTITUTIONAL_CEILING).max(Decimal::ZERO)
    }

    /// Percentage by which real pay exceeds the ceiling, to 1 decimal place.
    pub fn percent_above_ceiling(&self) -> Decimal {
        round_ratio(self.amount_above_ceiling() / CONSTITUTIONAL_CEILING * Decimal::ONE_HUNDRED)
    }

    /// How many times `other`'s real pay this career earns, to 1 decimal place.
    pub fn pay_ratio(&self, other: &CareerData) -> Decimal {
        if other.salary_real.is_zero() {
            return Decimal::ZERO;
        }
        round_ratio(self.salary_real / other.salary_real)
    }
}

/// Order of the careers listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CareerSort {
    /// Lowest real pay first
    #[default]
    Salary,
    /// Largest allowances first
    Gap,
}

#[allow(clippy::too_many_arguments)]
fn career(
    id: &'static str,
    name: &'static str,
    category: Category,
    salary_base: i64,
    salary_real: i64,
    salary_max: i64,
    allowances: i64,
    source: &'static str,
    source_url: &'static str,
    education: &'static str,
    weekly_hours: u8,
    risk_level: RiskLevel,
    color: &'static str,
) -> CareerData {
    // Amounts are given in cents.
    CareerData {
        id,
        name,
        category,
        salary_base: Decimal::new(salary_base, 2),
        salary_real: Decimal::new(salary_real, 2),
        salary_max: Decimal::new(salary_max, 2),
        allowances: Decimal::new(allowances, 2),
        source,
        source_url,
        education,
        weekly_hours,
        risk_level,
        color,
    }
}

static CAREERS: LazyLock<Vec<CareerData>> = LazyLock::new(|| {
    use Category::*;
    use RiskLevel::*;

    const JUSBR: &str = "https://dadosjusbr.org";
    const SENASP: &str = "https://www.gov.br/mj/pt-br/assuntos/sua-seguranca";
    const PF: &str = "https://www.gov.br/pf/pt-br";

    vec![
        career(
            "professor",
            "Teacher (basic education)",
            Essential,
            513_063,
            513_063,
            1_200_000,
            0,
            "Portaria MEC nº 82/2026",
            "https://www.gov.br/mec/pt-br/assuntos/noticias/2026/janeiro/piso-nacional-do-magisterio-e-fixado-em-r-5-1-mil",
            "Teaching degree",
            40,
            Medium,
            "#3B82F6",
        ),
        career(
            "enfermeiro",
            "Nurse",
            Essential,
            475_000,
            475_000,
            800_000,
            0,
            "Lei 14.434/2022",
            "https://www.planalto.gov.br/ccivil_03/_ato2019-2022/2022/lei/l14434.htm",
            "Nursing degree",
            40,
            High,
            "#8B5CF6",
        ),
        career(
            "soldado_pm",
            "Military police private",
            Security,
            635_800,
            635_800,
            1_000_000,
            0,
            "National average (SENASP/MJSP)",
            SENASP,
            "High school + training course",
            40,
            VeryHigh,
            "#06B6D4",
        ),
        career(
            "agente_pf",
            "Federal police agent",
            Security,
            1_416_400,
            1_416_400,
            2_100_000,
            0,
            "Lei 13.333/2016 (2025 adjustment)",
            PF,
            "Any bachelor's degree",
            40,
            VeryHigh,
            "#0EA5E9",
        ),
        career(
            "delegado_pf",
            "Federal police chief",
            Security,
            2_680_000,
            2_680_000,
            4_135_000,
            0,
            "Lei 13.333/2016 (2025 adjustment)",
            PF,
            "Law degree",
            40,
            High,
            "#2563EB",
        ),
        career(
            "agente_pc",
            "Civil police agent (average)",
            Security,
            720_000,
            720_000,
            1_300_000,
            0,
            "State average (SENASP/MJSP 2025)",
            SENASP,
            "Bachelor's degree in most states",
            40,
            VeryHigh,
            "#7C3AED",
        ),
        career(
            "delegado_pc",
            "Civil police chief (average)",
            Security,
            2_200_000,
            2_200_000,
            3_500_000,
            0,
            "State average (SENASP/MJSP 2025)",
            SENASP,
            "Law degree",
            40,
            High,
            "#6D28D9",
        ),
        career(
            "juiz_media",
            "Judge (national average)",
            Justice,
            3_546_200,
            8_150_000,
            20_000_000,
            4_603_800,
            "DadosJusBr / Mov. Pessoas à Frente (2025)",
            JUSBR,
            "Law degree + 3 years of practice",
            35,
            Low,
            "#EF4444",
        ),
        career(
            "juiz_tjsp",
            "Judge (TJSP)",
            Justice,
            3_546_200,
            12_280_000,
            30_000_000,
            8_733_800,
            "DadosJusBr / Mov. Pessoas à Frente (2025)",
            JUSBR,
            "Law degree + 3 years of practice",
            35,
            Low,
            "#DC2626",
        ),
        career(
            "procurador_mp",
            "Public prosecutor",
            Justice,
            3_546_200,
            7_300_000,
            18_000_000,
            3_753_800,
            "DadosJusBr (2025)",
            JUSBR,
            "Law degree + 3 years of practice",
            35,
            Low,
            "#F97316",
        ),
    ]
});

pub fn careers() -> &'static [CareerData] {
    &CAREERS
}

pub fn career_by_id(id: &str) -> Option<&'static CareerData> {
    CAREERS.iter().find(|c| c.id == id)
}

pub fn careers_by_category(category: Category) -> Vec<&'static CareerData> {
    CAREERS.iter().filter(|c| c.category == category).collect()
}

pub fn sort_careers(careers: &mut [&CareerData], sort: CareerSort) {
    match sort {
        CareerSort::Salary => careers.sort_by(|a, b| a.salary_real.cmp(&b.salary_real)),
        CareerSort::Gap => careers.sort_by(|a, b| b.allowances.cmp(&a.allowances)),
    }
}

/// Careers in the requested order, optionally restricted to one category.
pub fn careers_listing(
    sort: CareerSort,
    category: Option<Category>,
) -> Vec<&'static CareerData> {
    let mut selected = match category {
        Some(category) => careers_by_category(category),
        None => CAREERS.iter().collect(),
    };
    sort_careers(&mut selected, sort);
    selected
}

/// What the yearly supersalary cost could pay for instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialCost {
    pub label: &'static str,
    pub monthly_amount: Decimal,
    pub payments_per_year: u32,
}

impl SocialCost {
    pub fn total_possible(&self) -> Decimal {
        (SUPERSALARY_ANNUAL_COST / (self.monthly_amount * Decimal::from(self.payments_per_year)))
            .trunc()
    }
}

pub fn social_costs() -> Vec<SocialCost> {
    vec![
        SocialCost {
            label: "teachers on the salary floor",
            monthly_amount: Decimal::new(513_063, 2),
            payments_per_year: 13,
        },
        SocialCost {
            label: "nurses on the salary floor",
            monthly_amount: Decimal::new(475_000, 2),
            payments_per_year: 13,
        },
        SocialCost {
            label: "military police privates",
            monthly_amount: Decimal::new(635_800, 2),
            payments_per_year: 13,
        },
        SocialCost {
            label: "full university scholarships (R$ 1,200/month)",
            monthly_amount: Decimal::new(120_000, 2),
            payments_per_year: 12,
        },
    ]
}

/// Monthly judge and teacher pay in one country, in its own currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryPay {
    pub country: &'static str,
    pub flag: &'static str,
    pub currency: &'static str,
    pub judge: Decimal,
    pub judge_note: &'static str,
    pub teacher: Decimal,
    pub teacher_note: &'static str,
    pub source: &'static str,
}

pub fn international_pay() -> Vec<CountryPay> {
    vec![
        CountryPay {
            country: "Brazil",
            flag: "🇧🇷",
            currency: "BRL",
            judge: Decimal::new(8_150_000, 2),
            judge_note: "National average with allowances (DadosJusBr 2025)",
            teacher: Decimal::new(513_063, 2),
            teacher_note: "National floor (Portaria MEC 82/2026)",
            source: "DadosJusBr + MEC",
        },
        CountryPay {
            country: "USA",
            flag: "🇺🇸",
            currency: "USD",
            judge: Decimal::from(26_300),
            judge_note: "Federal judge: ~US$220k-274k/year (judiciary.gov 2025)",
            teacher: Decimal::from(6_900),
            teacher_note: "Public school teacher: ~US$65k/year (BLS 2024)",
            source: "US Courts / BLS",
        },
        CountryPay {
            country: "Germany",
            flag: "🇩🇪",
            currency: "EUR",
            judge: Decimal::from(8_500),
            judge_note: "Richter R3 (Bundesbesoldung 2025)",
            teacher: Decimal::from(6_400),
            teacher_note: "Gymnasiallehrer (OECD 2023)",
            source: "OECD Government at a Glance 2023",
        },
        CountryPay {
            country: "Portugal",
            flag: "🇵🇹",
            currency: "EUR",
            judge: Decimal::from(6_000),
            judge_note: "Juiz de Direito (CSTJ 2025)",
            teacher: Decimal::from(2_800),
            teacher_note: "Professor QZP (DGAE 2025)",
            source: "CSTJ / DGAE Portugal",
        },
    ]
}

/// One row of the international comparison, with pay converted to the base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryComparison {
    pub pay: CountryPay,
    /// `None` when the snapshot cannot convert the country's currency.
    pub judge_converted: Option<Decimal>,
    pub teacher_converted: Option<Decimal>,
    pub ratio: Decimal,
}

pub fn international_comparison(
    snapshot: &RateSnapshot,
    base_currency: &str,
) -> Vec<CountryComparison> {
    international_pay()
        .into_iter()
        .map(|pay| {
            let to_base = |amount: Decimal| -> Result<Decimal, ConversionError> {
                if pay.currency.eq_ignore_ascii_case(base_currency) {
                    Ok(amount)
                } else {
                    convert(amount, pay.currency, snapshot)
                }
            };
            let converted = (to_base(pay.judge), to_base(pay.teacher));
            let (judge_converted, teacher_converted) = match converted {
                (Ok(judge), Ok(teacher)) => (Some(judge), Some(teacher)),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(country = pay.country, error = %e, "Cannot convert pay");
                    (None, None)
                }
            };

            CountryComparison {
                ratio: round_ratio(pay.judge / pay.teacher),
                judge_converted,
                teacher_converted,
                pay,
            }
        })
        .collect()
}

fn round_ratio(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback::FallbackTable;
    use crate::core::rate::{ExchangeRate, Provenance};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn test_constants() {
        assert_eq!(CONSTITUTIONAL_CEILING, dec!(46366.19));
        assert_eq!(SUPERSALARY_ANNUAL_COST, dec!(20_000_000_000));
    }

    #[test]
    fn test_career_lookup() {
        let judge = career_by_id("juiz_media").unwrap();
        assert_eq!(judge.salary_real, dec!(81500.00));
        assert_eq!(judge.salary_base + judge.allowances, judge.salary_real);
        assert!(judge.exceeds_ceiling());
        assert_eq!(judge.ceiling_multiple(), dec!(1.8));
        assert!(career_by_id("astronaut").is_none());
        assert!(!career_by_id("professor").unwrap().exceeds_ceiling());
    }

    #[test]
    fn test_careers_by_category() {
        let justice = careers_by_category(Category::Justice);
        assert_eq!(justice.len(), 3);
        assert!(justice.iter().all(|c| c.category == Category::Justice));
        assert_eq!(careers_by_category(Category::Essential).len(), 2);
    }

    #[test]
    fn test_careers_sorted_by_salary() {
        let sorted = careers_listing(CareerSort::Salary, None);
        assert_eq!(sorted.len(), careers().len());
        assert_eq!(sorted.first().unwrap().id, "enfermeiro");
        assert_eq!(sorted.last().unwrap().id, "juiz_tjsp");
        assert!(sorted.windows(2).all(|w| w[0].salary_real <= w[1].salary_real));
    }

    #[test]
    fn test_careers_sorted_by_gap() {
        let sorted = careers_listing(CareerSort::Gap, None);
        let ids: Vec<_> = sorted.iter().take(3).map(|c| c.id).collect();
        assert_eq!(ids, vec!["juiz_tjsp", "juiz_media", "procurador_mp"]);
        assert!(sorted.windows(2).all(|w| w[0].allowances >= w[1].allowances));
    }

    #[test]
    fn test_careers_listing_by_category() {
        let security = careers_listing(CareerSort::Salary, Some(Category::Security));
        assert_eq!(security.len(), 5);
        assert_eq!(security.first().unwrap().id, "soldado_pm");
        assert!(security.iter().all(|c| c.category == Category::Security));
    }

    #[test]
    fn test_amount_above_ceiling() {
        let tjsp = career_by_id("juiz_tjsp").unwrap();
        assert_eq!(tjsp.amount_above_ceiling(), dec!(76433.81));
        assert_eq!(tjsp.percent_above_ceiling(), dec!(164.8));
        assert_eq!(
            career_by_id("juiz_media").unwrap().percent_above_ceiling(),
            dec!(75.8)
        );

        let nurse = career_by_id("enfermeiro").unwrap();
        assert_eq!(nurse.amount_above_ceiling(), Decimal::ZERO);
        assert_eq!(nurse.percent_above_ceiling(), Decimal::ZERO);
    }

    #[test]
    fn test_pay_ratio() {
        let tjsp = career_by_id("juiz_tjsp").unwrap();
        let nurse = career_by_id("enfermeiro").unwrap();
        assert_eq!(tjsp.pay_ratio(nurse), dec!(25.9));
        assert_eq!(nurse.pay_ratio(nurse), dec!(1.0));
    }

    #[test]
    fn test_social_costs() {
        let costs = social_costs();
        assert_eq!(costs[0].total_possible(), dec!(299858));
        assert_eq!(costs[3].total_possible(), dec!(1388888));
    }

    #[test]
    fn test_international_comparison_with_static_rates() {
        let table = FallbackTable::default();
        let snapshot = RateSnapshot::new(
            table.select(&["USD".to_string(), "EUR".to_string()]),
            Utc::now(),
        );
        let rows = international_comparison(&snapshot, "BRL");

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].judge_converted, Some(dec!(81500.00)));
        assert_eq!(rows[0].ratio, dec!(15.9));
        assert_eq!(rows[1].pay.flag, "🇺🇸");
        assert_eq!(rows[2].pay.flag, "🇩🇪");
        assert_eq!(rows[3].pay.flag, "🇵🇹");
        assert_eq!(rows[1].judge_converted, Some(dec!(152540.00)));
        assert_eq!(rows[1].teacher_converted, Some(dec!(40020.00)));
        assert_eq!(rows[1].ratio, dec!(3.8));
        assert_eq!(rows[2].judge_converted, Some(dec!(51850.00)));
        assert_eq!(rows[3].ratio, dec!(2.1));
    }

    #[test]
    fn test_international_comparison_missing_currency() {
        let usd = ExchangeRate::new("USD", dec!(5.70), dec!(5.80), Provenance::Primary, "", "");
        let snapshot = RateSnapshot::new(HashMap::from([("USD".to_string(), usd)]), Utc::now());
        let rows = international_comparison(&snapshot, "BRL");

        assert_eq!(rows[1].judge_converted, Some(dec!(151225.00)));
        assert!(rows[2].judge_converted.is_none());
        assert!(rows[3].teacher_converted.is_none());
    }
}
