//! Markdown and JSON report generation.
//!
//! This module renders a [`MarketReport`] for people (Markdown, in the
//! report's language) or for other programs (JSON).

use crate::analysis::insights::format_usd;
use crate::config::ReportConfig;
use crate::models::{
    FundingCliff, Language, MarketOverview, MarketReport, RegionalSnapshot, ReportMetadata,
    RoleDemand, SalaryIntelligence, StrategicInsight,
};
use anyhow::Result;

/// Pick the English or Spanish form of a fixed label.
fn t(lang: Language, en: &'static str, es: &'static str) -> &'static str {
    match lang {
        Language::En => en,
        Language::Es => es,
    }
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &MarketReport, options: &ReportConfig) -> String {
    let lang = report.metadata.language;
    let mut output = String::new();

    output.push_str(&format!(
        "# {}\n\n",
        t(lang, "FQHC Market Intelligence Report", "Informe de Inteligencia de Mercado FQHC")
    ));

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(report, options));
    output.push_str(&generate_overview_section(&report.overview, lang));
    output.push_str(&generate_insights_section(&report.insights, lang));

    if options.include_regions {
        output.push_str(&generate_regions_section(&report.regions, lang));
    }
    if options.include_roles {
        output.push_str(&generate_roles_section(&report.roles, options.max_roles, lang));
    }
    if options.include_funding_cliffs {
        output.push_str(&generate_cliffs_section(
            &report.funding_cliffs,
            options.include_past_events,
            lang,
        ));
    }
    if options.include_salaries {
        output.push_str(&generate_salary_section(&report.salaries, lang));
    }

    output.push_str(&generate_footer(lang));

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let lang = metadata.language;
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", t(lang, "Metadata", "Metadatos")));
    section.push_str(&format!(
        "- **{}:** {}\n",
        t(lang, "Generated", "Generado"),
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **{}:** {}\n",
        t(lang, "Organizations", "Organizaciones"),
        metadata.organizations
    ));
    section.push_str(&format!(
        "- **{}:** {}\n",
        t(lang, "Job Listings", "Vacantes"),
        metadata.job_listings
    ));
    section.push_str(&format!(
        "- **{}:** {}\n",
        t(lang, "Layoff Events", "Eventos de Despido"),
        metadata.layoff_events
    ));
    section.push_str(&format!(
        "- **{}:** {}\n",
        t(lang, "Salary Benchmarks", "Referencias Salariales"),
        metadata.salary_benchmarks
    ));
    section.push_str(&format!(
        "- **{}:** {}\n",
        t(lang, "Policy Events", "Eventos de Política"),
        metadata.policy_events
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &MarketReport, options: &ReportConfig) -> String {
    let lang = report.metadata.language;
    let mut toc = String::new();

    toc.push_str(&format!("## {}\n\n", t(lang, "Table of Contents", "Contenido")));
    toc.push_str(&format!("- [{}](#overview)\n", t(lang, "Overview", "Resumen")));
    if !report.insights.is_empty() {
        toc.push_str(&format!(
            "- [{}](#strategic-insights)\n",
            t(lang, "Strategic Insights", "Perspectivas Estratégicas")
        ));
    }
    if options.include_regions {
        toc.push_str(&format!(
            "- [{}](#regional-snapshots)\n",
            t(lang, "Regional Snapshots", "Panorama Regional")
        ));
    }
    if options.include_roles {
        toc.push_str(&format!(
            "- [{}](#role-demand)\n",
            t(lang, "Role Demand", "Demanda por Puesto")
        ));
    }
    if options.include_funding_cliffs {
        toc.push_str(&format!(
            "- [{}](#funding-cliffs)\n",
            t(lang, "Funding Cliffs", "Precipicios de Financiamiento")
        ));
    }
    if options.include_salaries {
        toc.push_str(&format!(
            "- [{}](#salary-benchmarks)\n",
            t(lang, "Salary Benchmarks", "Referencias Salariales")
        ));
    }
    toc.push('\n');

    toc
}

/// Generate the overview section.
fn generate_overview_section(overview: &MarketOverview, lang: Language) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {} {{#overview}}\n\n", t(lang, "Overview", "Resumen")));
    section.push_str(&format!(
        "| {} | {} |\n|:---|---:|\n",
        t(lang, "Metric", "Métrica"),
        t(lang, "Value", "Valor")
    ));

    let rows: Vec<(&str, String)> = vec![
        (t(lang, "Health centers", "Centros de salud"), overview.total_fqhcs.to_string()),
        (t(lang, "Open listings", "Vacantes abiertas"), overview.total_jobs.to_string()),
        (t(lang, "Role types", "Tipos de puesto"), overview.role_types.to_string()),
        (
            t(lang, "Regions with listings", "Regiones con vacantes"),
            overview.regions_with_jobs.to_string(),
        ),
        (t(lang, "Average salary", "Salario promedio"), format_usd(overview.avg_salary)),
        (
            t(lang, "Bilingual listings", "Vacantes bilingües"),
            format!("{}%", overview.bilingual_pct),
        ),
        (
            t(lang, "High funding impact", "Alto impacto de financiamiento"),
            overview.high_impact_fqhcs.to_string(),
        ),
        (
            t(lang, "Organizations with layoffs", "Organizaciones con despidos"),
            overview.layoff_organizations.to_string(),
        ),
        (
            t(lang, "Employees laid off", "Empleados despedidos"),
            overview.layoff_employees.to_string(),
        ),
    ];
    for (label, value) in rows {
        section.push_str(&format!("| {} | {} |\n", label, value));
    }
    section.push('\n');

    if let Some(ref top) = overview.top_employer {
        section.push_str(&format!(
            "- **{}:** {} ({})\n",
            t(lang, "Top employer", "Principal empleador"),
            top.name,
            top.job_count
        ));
    }
    if let Some(ref top) = overview.top_role {
        section.push_str(&format!(
            "- **{}:** {} ({})\n",
            t(lang, "Most-posted role", "Puesto más publicado"),
            top.label,
            top.count
        ));
    }
    if let Some(ref top) = overview.top_region {
        section.push_str(&format!(
            "- **{}:** {} ({})\n",
            t(lang, "Busiest region", "Región más activa"),
            top.label,
            top.count
        ));
    }
    section.push('\n');

    section
}

/// Generate the insights section.
fn generate_insights_section(insights: &[StrategicInsight], lang: Language) -> String {
    if insights.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str(&format!(
        "## {} {{#strategic-insights}}\n\n",
        t(lang, "Strategic Insights", "Perspectivas Estratégicas")
    ));

    for insight in insights {
        section.push_str(&generate_insight_block(insight, lang));
    }

    section
}

/// Generate a single insight block.
fn generate_insight_block(insight: &StrategicInsight, lang: Language) -> String {
    let mut block = String::new();

    block.push_str(&format!(
        "### {} *({})*\n\n",
        insight.title.get(lang),
        insight.category
    ));
    block.push_str(insight.narrative.get(lang));
    block.push_str("\n\n");

    for point in &insight.data_points {
        block.push_str(&format!("- {}\n", point));
    }
    if !insight.data_points.is_empty() {
        block.push('\n');
    }

    block.push_str(&format!(
        "> 💡 **{}:** {}\n\n",
        t(lang, "Recommended action", "Acción recomendada"),
        insight.action.get(lang)
    ));
    block.push_str("---\n\n");

    block
}

/// Generate the regional snapshot table.
fn generate_regions_section(regions: &[RegionalSnapshot], lang: Language) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "## {} {{#regional-snapshots}}\n\n",
        t(lang, "Regional Snapshots", "Panorama Regional")
    ));
    section.push_str(&format!(
        "| {} | {} | FQHCs | {} | {} | {} | {} | {} |\n",
        t(lang, "Signal", "Señal"),
        t(lang, "Region", "Región"),
        t(lang, "Listings", "Vacantes"),
        t(lang, "Avg Range", "Rango Prom."),
        t(lang, "Laid Off", "Despedidos"),
        t(lang, "High/Mod/Low", "Alto/Med/Bajo"),
        t(lang, "Top Roles", "Puestos Principales")
    ));
    section.push_str("|:---:|:---|:---:|:---:|:---:|:---:|:---:|:---|\n");

    for r in regions {
        let roles = r
            .top_roles
            .iter()
            .map(|c| format!("{} ({})", c.label, c.count))
            .collect::<Vec<_>>()
            .join(", ");
        section.push_str(&format!(
            "| {} {} | {} | {} | {} | {}–{} | {} ({}) | {}/{}/{} | {} |\n",
            r.health_signal.emoji(),
            r.health_signal,
            r.region,
            r.fqhc_count,
            r.total_jobs,
            format_usd(r.avg_salary_min),
            format_usd(r.avg_salary_max),
            r.layoff_employees,
            r.recent_layoffs,
            r.high_impact,
            r.moderate_impact,
            r.low_impact,
            roles
        ));
    }
    section.push('\n');

    section
}

/// Generate the role demand table.
fn generate_roles_section(roles: &[RoleDemand], max_rows: usize, lang: Language) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "## {} {{#role-demand}}\n\n",
        t(lang, "Role Demand", "Demanda por Puesto")
    ));

    if roles.is_empty() {
        section.push_str(t(lang, "No job listings available.\n\n", "No hay vacantes disponibles.\n\n"));
        return section;
    }

    section.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} | {} |\n",
        t(lang, "Role", "Puesto"),
        t(lang, "Demand", "Demanda"),
        t(lang, "Listings", "Vacantes"),
        t(lang, "Avg Range", "Rango Prom."),
        t(lang, "Bilingual", "Bilingüe"),
        t(lang, "Laid Off", "Despedidos"),
        t(lang, "Top Regions", "Regiones Principales")
    ));
    section.push_str("|:---|:---:|:---:|:---:|:---:|:---:|:---|\n");

    for role in roles.iter().take(max_rows) {
        let regions = role
            .top_regions
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        section.push_str(&format!(
            "| {} | {} {} | {} | {}–{} | {}% | {} | {} |\n",
            role.role_type,
            role.demand_signal.emoji(),
            role.demand_signal,
            role.job_count,
            format_usd(role.avg_salary_min),
            format_usd(role.avg_salary_max),
            role.bilingual_pct,
            role.layoffs_in_role,
            regions
        ));
    }
    if roles.len() > max_rows {
        section.push_str(&format!(
            "\n*{} {}*\n",
            roles.len() - max_rows,
            t(lang, "more role types not shown", "tipos de puesto más no mostrados")
        ));
    }
    section.push('\n');

    section
}

/// Generate the funding-cliff timeline.
fn generate_cliffs_section(cliffs: &[FundingCliff], include_past: bool, lang: Language) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "## {} {{#funding-cliffs}}\n\n",
        t(lang, "Funding Cliffs", "Precipicios de Financiamiento")
    ));

    let shown: Vec<&FundingCliff> = cliffs.iter().filter(|c| include_past || !c.is_past).collect();
    if shown.is_empty() {
        section.push_str(t(lang, "No policy events scheduled.\n\n", "No hay eventos de política programados.\n\n"));
        return section;
    }

    for cliff in shown {
        let countdown = if cliff.is_past {
            t(lang, "in effect", "en vigor").to_string()
        } else if cliff.days_until == 0 {
            t(lang, "today", "hoy").to_string()
        } else {
            format!("{} {}", cliff.days_until, t(lang, "days", "días"))
        };

        section.push_str(&format!(
            "### {} · {} ({})\n\n",
            cliff.date.format("%Y-%m-%d"),
            cliff.title.get(lang),
            countdown
        ));
        section.push_str(&format!(
            "*{}* · {}\n\n",
            cliff.category,
            cliff.description.get(lang)
        ));
        section.push_str(&format!(
            "**{}:** {}\n\n",
            t(lang, "Impact", "Impacto"),
            cliff.impact.get(lang)
        ));
        if let Some(ref dollars) = cliff.dollar_impact {
            section.push_str(&format!("- 💵 {}\n", dollars));
        }
        if let Some(ref people) = cliff.people_affected {
            section.push_str(&format!("- 👥 {}\n", people));
        }
        if cliff.dollar_impact.is_some() || cliff.people_affected.is_some() {
            section.push('\n');
        }
    }

    section
}

/// Generate the salary benchmark table.
fn generate_salary_section(salaries: &[SalaryIntelligence], lang: Language) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "## {} {{#salary-benchmarks}}\n\n",
        t(lang, "Salary Benchmarks", "Referencias Salariales")
    ));
    section.push_str(&format!(
        "| {} | P25 | P50 | P75 | {} | {} | {} |\n",
        t(lang, "Role", "Puesto"),
        t(lang, "Listings", "Vacantes"),
        t(lang, "Observed Range", "Rango Observado"),
        t(lang, "Position", "Posición")
    ));
    section.push_str("|:---|---:|---:|---:|:---:|:---:|:---|\n");

    for s in salaries {
        let observed = if s.listing_count == 0 {
            "—".to_string()
        } else {
            format!("{}–{}", format_usd(s.avg_salary_min), format_usd(s.avg_salary_max))
        };
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            s.label.get(lang),
            format_usd(u64::from(s.p25)),
            format_usd(u64::from(s.p50)),
            format_usd(u64::from(s.p75)),
            s.listing_count,
            observed,
            s.market_position
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer(lang: Language) -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(t(
        lang,
        "*Report generated by FQHC Intel*\n",
        "*Informe generado por FQHC Intel*\n",
    ));

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &MarketReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
