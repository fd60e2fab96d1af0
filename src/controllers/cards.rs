use maud::html;

use crate::metadata::ItemSummary;
use crate::repository::Family;

pub fn item_href(family: Family, category: &str, slug: &str) -> String {
    format!("/{family}/{category}/{slug}")
}

/// Listing entry for one item.
pub fn render_card(family: Family, item: &ItemSummary) -> String {
    html! {
        a.item-href href=(item_href(family, &item.category, &item.slug)) {
            span.item-card.{ "category-" (item.category) } {
                span.item-title { (item.title) }
                span.item-category { (item.category) }
                span.item-date { (item.date) }
                @if !item.keywords.is_empty() {
                    span.item-keywords {
                        @for keyword in &item.keywords {
                            span.keyword { (keyword) }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;

    fn summary(keywords: Vec<&str>) -> ItemSummary {
        ItemSummary {
            slug: "fish-and-chips".to_string(),
            title: "Fish <And> Chips".to_string(),
            category: "food".to_string(),
            keywords: keywords.into_iter().map(str::to_string).collect(),
            date: "01 March 2024 10:00".to_string(),
            modified: SystemTime::now(),
        }
    }

    #[test]
    fn card_links_and_escapes() {
        let card = render_card(Family::Notes, &summary(vec!["#food", "#uk"]));
        assert!(card.contains("href=\"/notes/food/fish-and-chips\""));
        assert!(card.contains("Fish &lt;And&gt; Chips"));
        assert!(card.contains("<span class=\"keyword\">#uk</span>"));
    }

    #[test]
    fn card_without_keywords_has_no_keyword_block() {
        let card = render_card(Family::Posts, &summary(vec![]));
        assert!(!card.contains("item-keywords"));
    }
}
