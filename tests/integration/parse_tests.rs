//! Parser and skill matcher tests over saved pages

use job_sift::parser::{parse_detail, parse_listings, DetailPageParser, ListingPageParser};
use job_sift::skills::{MatchOptions, SkillMatcher};
use job_sift::{EnrichedJob, RegionTable};
use std::collections::BTreeMap;

const SERP: &str = include_str!("../fixtures/serp_sample.html");
const DETAIL: &str = include_str!("../fixtures/detail_sample.html");

fn skills(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_serp_fixture_records() {
    let records = parse_listings(SERP, Some("United States"), None);
    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(first.listing_id.as_deref(), Some("test123"));
    assert_eq!(first.title.as_deref(), Some("Robotics Engineer"));
    assert_eq!(first.company.as_deref(), Some("Acme Robotics"));
    assert_eq!(first.raw_location.as_deref(), Some("San Francisco, CA"));
    assert_eq!(
        first.summary.as_deref(),
        Some("Develop motion planning in Python. Work with ROS.")
    );
    assert_eq!(
        first.url.as_deref(),
        Some("https://www.indeed.com/rc/clk?jk=test123")
    );

    // Absolute hrefs are kept verbatim
    assert_eq!(
        records[1].url.as_deref(),
        Some("https://partner.example.com/apply/456")
    );

    // Older card style without any key or link
    let third = &records[2];
    assert_eq!(third.listing_id, None);
    assert_eq!(third.url, None);
    assert_eq!(third.company.as_deref(), Some("Gamma Industrial"));
    assert_eq!(third.summary.as_deref(), Some("Maintain robotic cells."));
}

#[test]
fn test_serp_fixture_region_domain() {
    let records = parse_listings(SERP, Some("United Kingdom"), None);
    assert_eq!(
        records[0].url.as_deref(),
        Some("https://www.indeed.co.uk/rc/clk?jk=test123")
    );

    let records = parse_listings(SERP, Some("United Kingdom"), Some("https://jobs.example.org"));
    assert_eq!(
        records[0].url.as_deref(),
        Some("https://jobs.example.org/rc/clk?jk=test123")
    );
}

#[test]
fn test_region_overrides_reach_parser() {
    let mut extra = BTreeMap::new();
    extra.insert("Atlantis".to_string(), "https://atlantis.example.com".to_string());
    let parser = ListingPageParser::new(RegionTable::with_overrides(&extra));

    let records = parser.parse(SERP, Some("Atlantis"), None);
    assert_eq!(
        records[0].url.as_deref(),
        Some("https://atlantis.example.com/rc/clk?jk=test123")
    );
}

#[test]
fn test_detail_fixture_text() {
    let text = parse_detail(Some(DETAIL)).expect("Description should be found");
    assert_eq!(
        text,
        "Acme Robotics is hiring a robotics engineer.\n\
         Strong C++ skills\n\
         Experience with MATLAB and Simulink\n\
         Simulation in Gazebo"
    );
}

#[test]
fn test_detail_fallback_on_unknown_layout() {
    let html = r#"<html><body>
        <div>Menu</div>
        <div class="new-layout"><p>We build autonomous tractors.</p><p>Kalman filters daily.</p></div>
    </body></html>"#;
    let text = DetailPageParser::default().parse(Some(html));
    assert_eq!(
        text.as_deref(),
        Some("We build autonomous tractors.\nKalman filters daily.")
    );
}

#[test]
fn test_skills_from_listing_and_detail() {
    let records = parse_listings(SERP, Some("United States"), None);
    let detail = parse_detail(Some(DETAIL));
    let matcher = SkillMatcher::default();

    let text = EnrichedJob::skill_text(&records[0], detail.as_deref());
    let found: Vec<String> = matcher.find(&text).into_iter().collect();
    assert_eq!(
        found,
        skills(&["c++", "gazebo", "matlab", "python", "ros", "simulink"])
    );

    let text = EnrichedJob::skill_text(&records[1], None);
    let found: Vec<String> = matcher.find(&text).into_iter().collect();
    assert_eq!(found, skills(&["integration", "plc", "scada"]));

    let text = EnrichedJob::skill_text(&records[2], None);
    assert!(matcher.find(&text).is_empty());
}

#[test]
fn test_fuzzy_pass_catches_misspelling() {
    let matcher = SkillMatcher::default();
    let text = "Experience with Solidwork assemblies";

    assert!(!matcher.find(text).contains("solidworks"));

    let options = MatchOptions {
        use_fuzzy: true,
        fuzzy_threshold: 90,
    };
    assert!(matcher.find_with(Some(text), options).contains("solidworks"));
}
