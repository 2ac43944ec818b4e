//! Narrative insights synthesized from the other views.
//!
//! Each insight is emitted only when its trigger holds, always in the order
//! demand shift, bilingual premium, funding risk, displaced workers. Text is
//! produced in English and Spanish.

use super::regional::{WARNING_HIGH_IMPACT_PCT, WARNING_LAYOFF_EMPLOYEES};
use super::roles::HOT_MIN_LISTINGS;
use crate::models::{
    DemandSignal, HealthSignal, InsightCategory, Localized, MarketOverview, RegionalSnapshot,
    RoleDemand, StrategicInsight,
};

/// Bilingual share (percent) a role must exceed to count toward the premium insight.
pub const BILINGUAL_MAJORITY_PCT: u32 = 50;
/// Total layoff headcount the displaced-worker insight requires.
pub const DISPLACED_WORKERS_MIN: u64 = 100;
/// Roles or regions quoted as data points per insight.
const MAX_DATA_POINTS: usize = 5;

/// Generate zero to four insights.
pub fn strategic_insights(
    overview: &MarketOverview,
    regions: &[RegionalSnapshot],
    roles: &[RoleDemand],
) -> Vec<StrategicInsight> {
    [
        demand_shift(roles),
        bilingual_premium(overview, roles),
        funding_risk(overview, regions),
        displaced_workers(overview, roles),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn demand_shift(roles: &[RoleDemand]) -> Option<StrategicInsight> {
    let hot: Vec<&RoleDemand> = roles
        .iter()
        .filter(|r| r.demand_signal == DemandSignal::Hot)
        .collect();
    let top = hot.first()?;

    let n = hot.len();
    let range = format!(
        "{}–{}",
        format_usd(top.avg_salary_min),
        format_usd(top.avg_salary_max)
    );

    Some(StrategicInsight {
        id: "hot-roles".to_string(),
        category: InsightCategory::DemandShift,
        title: Localized::new(
            format!("{} {} in high demand", n, plural(n, "role", "roles")),
            format!("{} {} con alta demanda", n, plural(n, "puesto", "puestos")),
        ),
        narrative: Localized::new(
            format!(
                "{} leads hiring with {} open listings paying {} on average. {} {} the \
                 high-demand bar of at least {} listings with layoffs under half of openings.",
                top.role_type,
                top.job_count,
                range,
                n,
                plural(n, "role type clears", "role types clear"),
                HOT_MIN_LISTINGS
            ),
            format!(
                "{} encabeza la contratación con {} vacantes que pagan {} en promedio. {} {} el \
                 umbral de alta demanda de al menos {} vacantes con despidos por debajo de la \
                 mitad de las vacantes.",
                top.role_type,
                top.job_count,
                range,
                n,
                plural(n, "tipo de puesto supera", "tipos de puesto superan"),
                HOT_MIN_LISTINGS
            ),
        ),
        data_points: hot
            .iter()
            .take(MAX_DATA_POINTS)
            .map(|r| {
                format!(
                    "{}: {} listings, {}–{}, {} laid off in role",
                    r.role_type,
                    r.job_count,
                    format_usd(r.avg_salary_min),
                    format_usd(r.avg_salary_max),
                    r.layoffs_in_role
                )
            })
            .collect(),
        action: Localized::new(
            format!(
                "Prioritize recruiting and credentialing pipelines for {}.",
                top.role_type
            ),
            format!(
                "Priorice las vías de reclutamiento y acreditación para {}.",
                top.role_type
            ),
        ),
    })
}

fn bilingual_premium(overview: &MarketOverview, roles: &[RoleDemand]) -> Option<StrategicInsight> {
    let bilingual: Vec<&RoleDemand> = roles
        .iter()
        .filter(|r| r.bilingual_pct > BILINGUAL_MAJORITY_PCT)
        .collect();
    let top = bilingual.first()?;
    let n = bilingual.len();

    let mut data_points: Vec<String> = bilingual
        .iter()
        .take(MAX_DATA_POINTS)
        .map(|r| {
            format!(
                "{}: {}% bilingual ({} listings)",
                r.role_type, r.bilingual_pct, r.job_count
            )
        })
        .collect();
    data_points.push(format!("All listings: {}% bilingual", overview.bilingual_pct));

    Some(StrategicInsight {
        id: "bilingual-premium".to_string(),
        category: InsightCategory::SalaryTrend,
        title: Localized::new(
            format!("Bilingual skills required in {} {}", n, plural(n, "role", "roles")),
            format!(
                "Se requieren habilidades bilingües en {} {}",
                n,
                plural(n, "puesto", "puestos")
            ),
        ),
        narrative: Localized::new(
            format!(
                "{}% of {} listings ask for bilingual candidates. Across all {} listings the \
                 share is {}%, and {} {} a bilingual majority.",
                top.bilingual_pct,
                top.role_type,
                overview.total_jobs,
                overview.bilingual_pct,
                n,
                plural(n, "role type has", "role types have")
            ),
            format!(
                "El {}% de las vacantes de {} buscan candidatos bilingües. En las {} vacantes \
                 totales la proporción es del {}%, y {} {} mayoría bilingüe.",
                top.bilingual_pct,
                top.role_type,
                overview.total_jobs,
                overview.bilingual_pct,
                n,
                plural(n, "tipo de puesto tiene", "tipos de puesto tienen")
            ),
        ),
        data_points,
        action: Localized::new(
            "Lead with Spanish-language proficiency on applications and ask employers about \
             bilingual pay differentials.",
            "Destaque su dominio del español en las solicitudes y pregunte a los empleadores \
             por diferenciales salariales bilingües.",
        ),
    })
}

fn funding_risk(overview: &MarketOverview, regions: &[RegionalSnapshot]) -> Option<StrategicInsight> {
    let at_risk: Vec<&RegionalSnapshot> = regions
        .iter()
        .filter(|r| r.health_signal == HealthSignal::Warning)
        .collect();
    if at_risk.is_empty() {
        return None;
    }

    let n = at_risk.len();
    let names = at_risk
        .iter()
        .map(|r| r.region.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Some(StrategicInsight {
        id: "regional-funding-risk".to_string(),
        category: InsightCategory::FundingRisk,
        title: Localized::new(
            format!(
                "{} {} workforce distress",
                n,
                plural(n, "region shows", "regions show")
            ),
            format!(
                "{} {} señales de riesgo laboral",
                n,
                plural(n, "región muestra", "regiones muestran")
            ),
        ),
        narrative: Localized::new(
            format!(
                "{} {} flagged because layoffs exceeded {} employees or more than {}% of {} \
                 health centers face high funding impact. Statewide, {} of {} FQHCs are rated \
                 high impact.",
                names,
                plural(n, "is", "are"),
                WARNING_LAYOFF_EMPLOYEES,
                WARNING_HIGH_IMPACT_PCT,
                plural(n, "its", "their"),
                overview.high_impact_fqhcs,
                overview.total_fqhcs
            ),
            format!(
                "{} {} en alerta porque los despidos superaron {} empleados o más del {}% de \
                 sus centros de salud enfrentan un alto impacto de financiamiento. En todo el \
                 estado, {} de {} FQHC tienen impacto alto.",
                names,
                plural(n, "está", "están"),
                WARNING_LAYOFF_EMPLOYEES,
                WARNING_HIGH_IMPACT_PCT,
                overview.high_impact_fqhcs,
                overview.total_fqhcs
            ),
        ),
        data_points: at_risk
            .iter()
            .take(MAX_DATA_POINTS)
            .map(|r| {
                format!(
                    "{}: {} laid off across {} events, {} of {} FQHCs high impact",
                    r.region, r.layoff_employees, r.recent_layoffs, r.high_impact, r.fqhc_count
                )
            })
            .collect(),
        action: Localized::new(
            "Build contingency plans for programs exposed to Medi-Cal and federal funding \
             changes in these regions.",
            "Prepare planes de contingencia para los programas expuestos a cambios de \
             financiamiento federal y de Medi-Cal en estas regiones.",
        ),
    })
}

fn displaced_workers(overview: &MarketOverview, roles: &[RoleDemand]) -> Option<StrategicInsight> {
    if overview.layoff_employees <= DISPLACED_WORKERS_MIN {
        return None;
    }

    let mut data_points = vec![
        format!("Layoff headcount: {}", overview.layoff_employees),
        format!("Organizations with layoffs: {}", overview.layoff_organizations),
        format!("Open listings: {}", overview.total_jobs),
    ];
    if let Some(top) = roles.first() {
        data_points.push(format!(
            "Most-posted role: {} ({} listings)",
            top.role_type, top.job_count
        ));
    }

    Some(StrategicInsight {
        id: "displaced-workers".to_string(),
        category: InsightCategory::Opportunity,
        title: Localized::new(
            format!("{} displaced workers entering the market", overview.layoff_employees),
            format!(
                "{} trabajadores desplazados ingresan al mercado",
                overview.layoff_employees
            ),
        ),
        narrative: Localized::new(
            format!(
                "Layoffs at {} {} affected {} employees. With {} open listings across {} {}, \
                 health centers that are still hiring can recruit experienced community health \
                 staff.",
                overview.layoff_organizations,
                plural(overview.layoff_organizations, "organization", "organizations"),
                overview.layoff_employees,
                overview.total_jobs,
                overview.role_types,
                plural(overview.role_types, "role type", "role types")
            ),
            format!(
                "Los despidos en {} {} afectaron a {} empleados. Con {} vacantes en {} {}, los \
                 centros de salud que siguen contratando pueden reclutar personal con \
                 experiencia en salud comunitaria.",
                overview.layoff_organizations,
                plural(overview.layoff_organizations, "organización", "organizaciones"),
                overview.layoff_employees,
                overview.total_jobs,
                overview.role_types,
                plural(overview.role_types, "tipo de puesto", "tipos de puesto")
            ),
        ),
        data_points,
        action: Localized::new(
            "Partner with affected organizations on rapid re-employment and fast-track \
             applicants with FQHC experience.",
            "Colabore con las organizaciones afectadas en la reubicación laboral rápida y \
             agilice a los solicitantes con experiencia en FQHC.",
        ),
    })
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Format a whole-dollar amount as `$46,000`.
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
