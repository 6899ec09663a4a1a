//! Comparison of category scores against a fixed industry table.

use crate::signals::SpeedData;
use crate::types::{
    Benchmark, BenchmarkComparison, BenchmarkStatus, Category, CategoryKey, PageType,
};

pub struct BenchmarkRow {
    pub key: CategoryKey,
    pub industry_avg: u8,
    pub top_performers: u8,
    /// Shown when the page scores below the industry average
    pub advice: &'static str,
}

pub const LIGHTHOUSE_AVG: u8 = 52;
pub const LIGHTHOUSE_TOP: u8 = 92;

pub static BENCHMARKS: [BenchmarkRow; 9] = [
    BenchmarkRow {
        key: CategoryKey::AboveTheFold,
        industry_avg: 58,
        top_performers: 85,
        advice: "Sharpen the headline and put the value proposition and primary CTA in the first viewport.",
    },
    BenchmarkRow {
        key: CategoryKey::Cta,
        industry_avg: 55,
        top_performers: 88,
        advice: "Make one primary CTA dominant, use outcome-driven copy and repeat it down the page.",
    },
    BenchmarkRow {
        key: CategoryKey::Trust,
        industry_avg: 50,
        top_performers: 85,
        advice: "Add reviews, trust badges and guarantees close to the decision point.",
    },
    BenchmarkRow {
        key: CategoryKey::Content,
        industry_avg: 60,
        top_performers: 87,
        advice: "Rewrite copy around benefits and structure it with scannable subheadings and USPs.",
    },
    BenchmarkRow {
        key: CategoryKey::Navigation,
        industry_avg: 65,
        top_performers: 90,
        advice: "Simplify the menu and add breadcrumbs and an FAQ where visitors need orientation.",
    },
    BenchmarkRow {
        key: CategoryKey::Design,
        industry_avg: 62,
        top_performers: 88,
        advice: "Use strong visuals above the fold and give the page a clear section rhythm.",
    },
    BenchmarkRow {
        key: CategoryKey::Performance,
        industry_avg: 48,
        top_performers: 90,
        advice: "Cut load time: optimise images, defer scripts and make sure the page is mobile-ready.",
    },
    BenchmarkRow {
        key: CategoryKey::Conversion,
        industry_avg: 52,
        top_performers: 86,
        advice: "Show price, guarantee and honest urgency where the visitor decides.",
    },
    BenchmarkRow {
        key: CategoryKey::Friction,
        industry_avg: 57,
        top_performers: 87,
        advice: "Shorten forms, reassure about privacy and remove exits from the purchase path.",
    },
];

fn classify(value: u8, avg: u8, top: u8) -> BenchmarkStatus {
    if value >= top {
        BenchmarkStatus::Above
    } else if value >= avg {
        BenchmarkStatus::At
    } else {
        BenchmarkStatus::Below
    }
}

fn industry_context(page_type: PageType) -> &'static str {
    match page_type {
        PageType::Home => "Home pages convert mainly by routing visitors quickly to the right category or offer; benchmarks reflect e-commerce and SaaS front pages.",
        PageType::Product => "Product pages carry most purchase decisions; top performers combine strong imagery, visible price, reviews and a dominant add-to-cart.",
        PageType::Collection => "Collection pages are judged on how fast visitors find and open the right product; filters, clear cards and prices drive results.",
        PageType::Cart => "Cart pages lose buyers to surprises; top performers show total cost, delivery and trust marks before checkout.",
        PageType::Checkout => "Checkout benchmarks focus on completion; enclosed, short checkouts with visible security outperform the average clearly.",
        PageType::Landing => "Landing pages are measured against campaign pages with a single goal; message match and one clear CTA separate the top performers.",
    }
}

/// Position each category (and Lighthouse, when measured) against the table
pub fn compare(
    overall_score: u8,
    page_type: PageType,
    categories: &[Category],
    speed: Option<&SpeedData>,
) -> Benchmark {
    let mut comparisons: Vec<BenchmarkComparison> = categories
        .iter()
        .filter_map(|category| {
            let row = BENCHMARKS.iter().find(|row| row.key == category.key)?;
            let status = classify(category.score, row.industry_avg, row.top_performers);
            Some(BenchmarkComparison {
                metric: category.name.clone(),
                your_value: category.score,
                industry_avg: row.industry_avg,
                top_performers: row.top_performers,
                status,
                recommendation: (status == BenchmarkStatus::Below).then(|| row.advice.to_string()),
            })
        })
        .collect();

    if let Some(speed) = speed {
        let status = classify(speed.performance_score, LIGHTHOUSE_AVG, LIGHTHOUSE_TOP);
        comparisons.push(BenchmarkComparison {
            metric: "Lighthouse Score".to_string(),
            your_value: speed.performance_score,
            industry_avg: LIGHTHOUSE_AVG,
            top_performers: LIGHTHOUSE_TOP,
            status,
            recommendation: (status == BenchmarkStatus::Below).then(|| {
                "Work through the Lighthouse opportunities, starting with the largest savings.".to_string()
            }),
        });
    }

    let rows = BENCHMARKS.len() as f64;
    let mean_avg = BENCHMARKS.iter().map(|r| f64::from(r.industry_avg)).sum::<f64>() / rows;
    let mean_top = BENCHMARKS.iter().map(|r| f64::from(r.top_performers)).sum::<f64>() / rows;
    let overall = f64::from(overall_score);

    let overall_position = if overall >= mean_top {
        format!("Top performer: {overall_score}/100 is on par with the best sites (≈{mean_top:.0}).")
    } else if overall >= mean_avg {
        format!(
            "Above average: {overall_score}/100 beats the industry average (≈{mean_avg:.0}) but trails the top performers (≈{mean_top:.0})."
        )
    } else {
        format!("Below average: {overall_score}/100 is under the industry average (≈{mean_avg:.0}).")
    };

    Benchmark {
        overall_position,
        comparisons,
        industry_context: industry_context(page_type).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(key: CategoryKey, score: u8) -> Category {
        Category {
            key,
            name: key.name().to_string(),
            icon: key.icon().to_string(),
            score,
            findings: Vec::new(),
        }
    }

    #[test]
    fn table_covers_every_category_in_order() {
        let keys: Vec<_> = BENCHMARKS.iter().map(|r| r.key).collect();
        assert_eq!(keys, CategoryKey::ALL.to_vec());
        assert!(BENCHMARKS.iter().all(|r| r.industry_avg < r.top_performers));
    }

    #[test]
    fn status_boundaries() {
        // CTA: avg 55, top 88
        let categories = [
            category(CategoryKey::Cta, 55),
            category(CategoryKey::Cta, 54),
            category(CategoryKey::Cta, 88),
        ];
        let benchmark = compare(60, PageType::Home, &categories, None);
        let statuses: Vec<_> = benchmark.comparisons.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            [BenchmarkStatus::At, BenchmarkStatus::Below, BenchmarkStatus::Above]
        );
        assert!(benchmark.comparisons[0].recommendation.is_none());
        assert!(benchmark.comparisons[1].recommendation.is_some());
        assert!(benchmark.comparisons[2].recommendation.is_none());
    }

    #[test]
    fn lighthouse_row_only_with_speed_data() {
        let categories: Vec<_> = CategoryKey::ALL.iter().map(|&k| category(k, 60)).collect();
        assert_eq!(compare(60, PageType::Product, &categories, None).comparisons.len(), 9);

        let speed = SpeedData {
            performance_score: 40,
            ..Default::default()
        };
        let benchmark = compare(60, PageType::Product, &categories, Some(&speed));
        let last = benchmark.comparisons.last().unwrap();
        assert_eq!(last.metric, "Lighthouse Score");
        assert_eq!((last.industry_avg, last.top_performers), (52, 92));
        assert_eq!(last.status, BenchmarkStatus::Below);
    }

    #[test]
    fn overall_position_against_table_means() {
        // mean avg = 56.3, mean top = 87.3
        let low = compare(40, PageType::Cart, &[], None);
        assert!(low.overall_position.starts_with("Below average"));
        let mid = compare(70, PageType::Cart, &[], None);
        assert!(mid.overall_position.starts_with("Above average"));
        let high = compare(90, PageType::Cart, &[], None);
        assert!(high.overall_position.starts_with("Top performer"));
    }
}
