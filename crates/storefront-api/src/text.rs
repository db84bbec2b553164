use std::fmt::Write;

use serde::Serialize;

use storefront_core::{
    CountryCode, CountryCount, Customer, CustomerCard, CustomerOrderCount, Result, TopScore,
};
use storefront_store::{CustomerSort, QueryLayer};

/// Result of every commerce query, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct CommerceReport {
    pub engine: String,
    pub country: CountryCode,
    pub customers: Vec<Customer>,
    pub customers_in_country: Vec<Customer>,
    pub country_counts: Vec<CountryCount>,
    pub customer_cards: Vec<CustomerCard>,
    pub customer_order_counts: Vec<CustomerOrderCount>,
}

impl CommerceReport {
    pub async fn collect<Q>(queries: &Q, country: CountryCode) -> Result<Self>
    where
        Q: QueryLayer + Sync + ?Sized,
    {
        Ok(Self {
            engine: queries.engine().to_string(),
            customers: queries.all_customers(CustomerSort::ById).await?,
            customers_in_country: queries.customers_by_country(&country).await?,
            country_counts: queries.country_counts().await?,
            customer_cards: queries.customer_cards().await?,
            customer_order_counts: queries.customer_order_counts().await?,
            country,
        })
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        section(&mut out, "customers", self.customers.len());
        for customer in &self.customers {
            let _ = writeln!(out, "  {customer}");
        }

        section(
            &mut out,
            &format!("customers in {}", self.country.as_str()),
            self.customers_in_country.len(),
        );
        for customer in &self.customers_in_country {
            let _ = writeln!(out, "  {customer}");
        }

        section(&mut out, "customers per country", self.country_counts.len());
        for row in &self.country_counts {
            let code = row.country_code.as_ref().map_or("-", CountryCode::as_str);
            let _ = writeln!(out, "  {code}  {}", row.customers);
        }

        section(&mut out, "customer cards", self.customer_cards.len());
        for row in &self.customer_cards {
            let address = row
                .address
                .as_deref()
                .map(single_line)
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(out, "  {} | {} | {}", row.fullname, address, row.number.as_str());
        }

        section(&mut out, "orders per customer", self.customer_order_counts.len());
        for row in &self.customer_order_counts {
            let _ = writeln!(out, "  {}  {}", row.customer_id, row.orders);
        }

        out
    }
}

/// One `player score` line per row.
pub fn render_scores(scores: &[TopScore]) -> String {
    let mut out = String::new();
    for row in scores {
        let _ = writeln!(out, "{} {}", row.player.as_str(), row.score);
    }
    out
}

pub fn render_scores_html(scores: &[TopScore]) -> String {
    let mut out = String::from(concat!(
        "<!doctype html>\n<html><head><title>Scores</title></head><body>\n",
        "<table>\n<tr><th>Player</th><th>Score</th></tr>\n",
    ));
    for row in scores {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(row.player.as_str()),
            row.score
        );
    }
    out.push_str("</table>\n</body></html>\n");
    out
}

fn section(out: &mut String, title: &str, rows: usize) {
    let _ = writeln!(out, "== {title} ({rows})");
}

fn single_line(value: &str) -> String {
    value.lines().map(str::trim).collect::<Vec<_>>().join(", ")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::PlayerName;

    fn score(player: &str, score: i64) -> TopScore {
        TopScore {
            player: PlayerName::new(player).expect("player"),
            score,
        }
    }

    #[test]
    fn renders_scores_one_per_line() {
        let text = render_scores(&[score("Bob", 5), score("Alice", 20)]);
        assert_eq!(text, "Bob 5\nAlice 20\n");
    }

    #[test]
    fn html_escapes_player_names() {
        let html = render_scores_html(&[score("<b>Eve</b>", 1)]);
        assert!(html.contains("<td>&lt;b&gt;Eve&lt;/b&gt;</td><td>1</td>"));
        assert!(!html.contains("<b>Eve"));
    }

    #[test]
    fn multi_line_addresses_collapse() {
        assert_eq!(
            single_line("1 Main Street\nSpringfield, IL 62701"),
            "1 Main Street, Springfield, IL 62701"
        );
    }
}
