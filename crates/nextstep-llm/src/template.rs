use std::fmt::Write as _;

use nextstep_core::types::RankedResource;

/// Reply used whenever no resource matched.
pub const NO_MATCH_MESSAGE: &str = "I couldn't find any resources that match your request. \
Try describing what you need in other words, or pick a category to browse.";

/// Deterministic reply built only from the ranked records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSynthesizer;

impl TemplateSynthesizer {
    pub fn render(&self, query: &str, top: &[RankedResource], found: usize) -> String {
        if found == 0 || top.is_empty() {
            return NO_MATCH_MESSAGE.to_string();
        }
        let noun = if found == 1 { "resource" } else { "resources" };
        let mut out = format!("I found {found} {noun} that may help with \"{}\":\n", query.trim());
        for (i, ranked) in top.iter().enumerate() {
            let record = &ranked.record;
            let _ = write!(out, "{}. {} ({})", i + 1, record.name, record.category.display_name());
            if let Some(address) = &record.address {
                let _ = write!(out, " - {address}");
            }
            if let Some(phone) = &record.phone {
                let _ = write!(out, " - Phone: {phone}");
            }
            if let Some(hours) = &record.hours {
                let _ = write!(out, " - Hours: {hours}");
            }
            out.push('\n');
        }
        if found > top.len() {
            let _ = writeln!(out, "Showing the top {} of {found}.", top.len());
        }
        out.push_str("Please call ahead to confirm hours and eligibility.");
        out
    }
}

/// Prompt for a text generator: the request plus every ranked record's contact fields.
pub fn build_prompt(query: &str, top: &[RankedResource]) -> String {
    let mut prompt = format!("Request: {}\n\nResources:\n", query.trim());
    for (i, ranked) in top.iter().enumerate() {
        let record = &ranked.record;
        let _ = write!(prompt, "{}. {} [{}]", i + 1, record.name, record.category.as_str());
        for (label, value) in [
            ("Description", &record.description),
            ("Address", &record.address),
            ("Phone", &record.phone),
            ("Website", &record.website),
            ("Hours", &record.hours),
        ] {
            if let Some(value) = value {
                let _ = write!(prompt, "\n   {label}: {value}");
            }
        }
        if !record.languages.is_empty() {
            let _ = write!(prompt, "\n   Languages: {}", record.languages.join(", "));
        }
        prompt.push('\n');
    }
    prompt.push_str("\nWrite a short, friendly reply that recommends these resources in order.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextstep_core::types::{Category, ResourceRecord};

    fn ranked(name: &str, category: Category, phone: Option<&str>) -> RankedResource {
        let record = ResourceRecord::new(name.to_lowercase(), name, category)
            .with_contact(Some("1 Main St".into()), phone.map(str::to_string));
        RankedResource { record, score: 1.0 }
    }

    #[test]
    fn no_matches_give_the_fixed_message() {
        assert_eq!(TemplateSynthesizer.render("anything", &[], 0), NO_MATCH_MESSAGE);
    }

    #[test]
    fn lists_records_in_rank_order() {
        let top = vec![
            ranked("Houston Food Bank", Category::Food, Some("713-223-3700")),
            ranked("Westside Pantry", Category::Food, None),
        ];
        let text = TemplateSynthesizer.render("I need groceries", &top, 3);
        assert!(text.starts_with("I found 3 resources that may help with \"I need groceries\":"));
        let first = text.find("1. Houston Food Bank (Food) - 1 Main St - Phone: 713-223-3700").unwrap();
        let second = text.find("2. Westside Pantry (Food) - 1 Main St").unwrap();
        assert!(first < second);
        assert!(text.contains("Showing the top 2 of 3."));
    }

    #[test]
    fn rendering_is_deterministic() {
        let top = vec![ranked("Clinic", Category::Healthcare, Some("555"))];
        assert_eq!(TemplateSynthesizer.render("doctor", &top, 1), TemplateSynthesizer.render("doctor", &top, 1));
        assert!(TemplateSynthesizer.render("doctor", &top, 1).starts_with("I found 1 resource that"));
    }

    #[test]
    fn prompt_carries_contact_fields() {
        let top = vec![ranked("Houston Food Bank", Category::Food, Some("713-223-3700"))];
        let prompt = build_prompt(" comida ", &top);
        assert!(prompt.starts_with("Request: comida\n"));
        assert!(prompt.contains("1. Houston Food Bank [food]"));
        assert!(prompt.contains("Phone: 713-223-3700"));
        assert!(prompt.contains("Address: 1 Main St"));
    }
}
