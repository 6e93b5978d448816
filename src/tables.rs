//! Static tables driving the restructure.
//!
//! Pure lookup configuration: which courses to process, the subtitle and
//! description for each known topic, and the level color palette. Misses
//! degrade instead of failing: an unknown topic gets its own name as the
//! subtitle and a generic description, and colors wrap around the palette
//! when a course has more topics than the palette has entries.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Level color palette, assigned cyclically by topic ordinal
pub const COLORS: &[&str] = &[
    "#3b82f6", "#059669", "#d97706", "#7c3aed", "#e11d48", "#0891b2", "#ca8a04", "#4f46e5",
    "#16a34a", "#dc2626", "#6366f1",
];

/// A course to restructure and the slug of its current single level
#[derive(Debug, Clone, Copy)]
pub struct CourseDescriptor {
    pub id: &'static str,
    pub old_level: &'static str,
}

/// Courses in processing order
pub const COURSES: &[CourseDescriptor] = &[
    CourseDescriptor {
        id: "cfa-1",
        old_level: "level-1",
    },
    CourseDescriptor {
        id: "cfa-2",
        old_level: "level-2",
    },
    CourseDescriptor {
        id: "cfa-3",
        old_level: "level-3",
    },
];

/// Subtitle and long description for a known topic
struct TopicStyle {
    subtitle: &'static str,
    description: &'static str,
}

static TOPIC_STYLES: OnceLock<HashMap<&'static str, TopicStyle>> = OnceLock::new();

fn topic_styles() -> &'static HashMap<&'static str, TopicStyle> {
    TOPIC_STYLES.get_or_init(|| {
        let entries: &[(&str, &str, &str)] = &[
            // CFA-1 & CFA-2
            (
                "Quantitative Methods",
                "Statistical tools and mathematical foundations for investment analysis",
                "Master statistical methods, probability, hypothesis testing, regression analysis, and data science techniques used in investment analysis.",
            ),
            (
                "Economics",
                "Micro and macroeconomic theory applied to financial markets",
                "Understand market structures, business cycles, monetary and fiscal policy, international trade, and exchange rate mechanics.",
            ),
            (
                "Corporate Issuers",
                "Corporate structure, governance, and capital allocation",
                "Analyze corporate governance, capital structure, working capital management, and business models for investment evaluation.",
            ),
            (
                "Financial Statement Analysis",
                "Analyzing financial statements for investment decisions",
                "Develop expertise in analyzing income statements, balance sheets, cash flows, and financial ratios across accounting standards.",
            ),
            (
                "Equity Investments",
                "Equity markets, valuation, and security analysis",
                "Learn equity market structure, security analysis, industry analysis, and valuation techniques for equity investments.",
            ),
            (
                "Fixed Income",
                "Bond markets, valuation, and risk management",
                "Master bond valuation, yield analysis, duration and convexity, credit analysis, and structured products.",
            ),
            (
                "Derivatives",
                "Forwards, futures, options, and swaps",
                "Understand derivative instruments, pricing models, and their applications in hedging and speculation.",
            ),
            (
                "Alternative Investments",
                "Private equity, real estate, hedge funds, and more",
                "Explore private equity, real estate, hedge funds, commodities, and digital assets as portfolio diversifiers.",
            ),
            (
                "Portfolio Management",
                "Portfolio theory, construction, and risk management",
                "Apply portfolio theory, risk management, and behavioral finance to construct and manage investment portfolios.",
            ),
            (
                "Ethical and Professional Standards",
                "CFA Institute Code of Ethics and Standards of Practice",
                "Apply the CFA Institute Code of Ethics and Standards of Professional Conduct to investment scenarios.",
            ),
            (
                "Mock Exam",
                "Full-length practice exams simulating real test conditions",
                "Test your knowledge with full-length mock exams that simulate the actual CFA exam experience.",
            ),
            // CFA-3
            (
                "Asset Allocation",
                "Capital market expectations, asset allocation, and behavioral finance",
                "Develop capital market expectations, apply asset allocation frameworks, and understand behavioral finance impacts.",
            ),
            (
                "Derivatives and Risk Management",
                "Option strategies, swaps, futures, and currency management",
                "Construct option strategies, apply swaps and futures for risk management, and manage currency exposure.",
            ),
            (
                "Portfolio Construction",
                "Equity, fixed-income, and alternative portfolio management",
                "Build and manage equity, fixed-income, and alternative investment portfolios for institutional investors.",
            ),
            (
                "Performance Measurement",
                "Performance evaluation, manager selection, and GIPS",
                "Evaluate portfolio performance, select investment managers, and apply GIPS standards.",
            ),
            (
                "Pathway: Portfolio Management",
                "Advanced portfolio strategies and private wealth management",
                "Advanced strategies in liability-driven investing, yield curve management, credit, equity, and multi-asset portfolios.",
            ),
            (
                "Pathway: Private Wealth",
                "Wealth planning, taxes, estate planning, and risk management",
                "Comprehensive wealth planning including taxes, estate planning, concentrated positions, and goals-based investing.",
            ),
            (
                "Pathway: Private Markets",
                "Private equity, debt, real estate, and infrastructure",
                "Analyze private equity, debt, real estate, infrastructure, and natural resources investments.",
            ),
        ];

        entries
            .iter()
            .map(|&(topic, subtitle, description)| {
                (
                    topic,
                    TopicStyle {
                        subtitle,
                        description,
                    },
                )
            })
            .collect()
    })
}

/// Color for the topic at the given 0-based ordinal (wraps on overflow)
pub fn color_for(ordinal: usize) -> &'static str {
    COLORS[ordinal % COLORS.len()]
}

/// Subtitle for a topic; unknown topics fall back to the topic name itself
pub fn subtitle_for(topic: &str) -> String {
    topic_styles()
        .get(topic)
        .map(|s| s.subtitle.to_string())
        .unwrap_or_else(|| topic.to_string())
}

/// Description for a topic; unknown topics get a synthesized generic one
pub fn description_for(topic: &str) -> String {
    topic_styles()
        .get(topic)
        .map(|s| s.description.to_string())
        .unwrap_or_else(|| format!("Study materials for {}.", topic))
}

/// Display title for a topic level ("Mock Exam" pluralizes)
pub fn level_title(topic: &str) -> String {
    if topic == "Mock Exam" {
        "Mock Exams".to_string()
    } else {
        topic.to_string()
    }
}
