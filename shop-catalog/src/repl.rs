//! Console front end
//!
//! Line commands for driving the controller from a terminal, and a plain
//! text rendering of the view.

use std::fmt::Write as _;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::criteria::{PriceBound, SortOption};
use crate::error::{CatalogError, CatalogResult};
use crate::state::{CatalogView, FetchState};

pub const HELP: &str = "\
commands:
  category <name>|-     select a category (- clears)
  size <size>           toggle a size
  color <color>         toggle a color
  min <price>|-         set the minimum price (- clears)
  max <price>|-         set the maximum price (- clears)
  sort <option>         newest | oldest | price-asc | price-desc | name-asc | name-desc
  clear                 reset all filters
  retry                 re-run the last query
  categories            reload categories
  show                  print the current view
  help                  print this help
  quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Category(Option<String>),
    Size(String),
    Color(String),
    Price(PriceBound, Option<Decimal>),
    Sort(SortOption),
    Clear,
    Retry,
    Categories,
    Show,
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_line(line: &str) -> CatalogResult<Option<ReplCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "category" | "cat" => ReplCommand::Category(optional_arg(rest).map(str::to_string)),
        "size" => ReplCommand::Size(required_arg(word, rest)?.to_string()),
        "color" | "colour" => ReplCommand::Color(required_arg(word, rest)?.to_string()),
        bound @ ("min" | "max") => {
            let bound = PriceBound::from_str(bound)?;
            let value = optional_arg(rest)
                .map(|v| {
                    Decimal::from_str(v)
                        .map_err(|_| CatalogError::InvalidInput(format!("not a price: {v}")))
                })
                .transpose()?;
            ReplCommand::Price(bound, value)
        }
        "sort" => ReplCommand::Sort(required_arg(word, rest)?.parse()?),
        "clear" => ReplCommand::Clear,
        "retry" => ReplCommand::Retry,
        "categories" => ReplCommand::Categories,
        "show" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(CatalogError::InvalidInput(format!("unknown command: {other}"))),
    };
    Ok(Some(command))
}

fn optional_arg(rest: &str) -> Option<&str> {
    (!rest.is_empty() && rest != "-").then_some(rest)
}

fn required_arg<'a>(word: &str, rest: &'a str) -> CatalogResult<&'a str> {
    if rest.is_empty() {
        Err(CatalogError::InvalidInput(format!("{word} needs an argument")))
    } else {
        Ok(rest)
    }
}

/// Plain text rendering of a view snapshot
pub fn render_view(view: &CatalogView) -> String {
    let mut out = String::new();
    let criteria = &view.criteria;

    let status = match &view.fetch_state {
        FetchState::Idle => "ready".to_string(),
        FetchState::Loading => "loading...".to_string(),
        FetchState::Error(message) => format!("error: {message} (type `retry`)"),
    };
    let _ = writeln!(out, "[{status}] {} product(s)", view.products.len());

    let _ = writeln!(
        out,
        "category: {}  sort: {}  filters: {}",
        criteria.category.as_deref().unwrap_or("all"),
        criteria.sort_option(),
        view.active_filter_count(),
    );
    let categories: Vec<&str> = view.active_categories().map(|c| c.name.as_str()).collect();
    if !categories.is_empty() {
        let _ = writeln!(out, "available categories: {}", categories.join(", "));
    }
    if !criteria.sizes.is_empty() {
        let sizes: Vec<&str> = criteria.sizes.iter().map(String::as_str).collect();
        let _ = writeln!(out, "sizes: {}", sizes.join(", "));
    }
    if !criteria.colors.is_empty() {
        let colors: Vec<&str> = criteria.colors.iter().map(String::as_str).collect();
        let _ = writeln!(out, "colors: {}", colors.join(", "));
    }
    if !view.price_input.is_empty() || !criteria.price.is_empty() {
        let _ = writeln!(
            out,
            "price: {} - {}{}",
            bound_label(view.price_input.min),
            bound_label(view.price_input.max),
            if view.price_input != criteria.price { " (pending)" } else { "" },
        );
    }

    if view.is_empty_result() {
        let _ = writeln!(out, "  no products match these filters");
    }
    for product in &view.products {
        let _ = write!(out, "  {}  {}", product.name, product.price);
        if let Some(percent) = product.discount_percent() {
            let _ = write!(out, "  -{percent}%");
        } else if product.is_on_sale() {
            let _ = write!(out, "  sale");
        }
        if product.is_new_arrival {
            let _ = write!(out, "  new");
        }
        if let Some(url) = product.primary_image_url() {
            let _ = write!(out, "  <{url}>");
        }
        out.push('\n');
    }
    out
}

fn bound_label(value: Option<Decimal>) -> String {
    value.map_or_else(|| "*".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{FilterCriteria, PriceRange};
    use shared::ProductSummary;

    #[test]
    fn test_parse_filter_commands() {
        assert_eq!(
            parse_line("category Dresses").unwrap(),
            Some(ReplCommand::Category(Some("Dresses".to_string())))
        );
        assert_eq!(parse_line("category -").unwrap(), Some(ReplCommand::Category(None)));
        assert_eq!(
            parse_line("  size  M ").unwrap(),
            Some(ReplCommand::Size("M".to_string()))
        );
        assert_eq!(
            parse_line("min 12.5").unwrap(),
            Some(ReplCommand::Price(
                PriceBound::Min,
                Some(Decimal::from_str("12.5").unwrap())
            ))
        );
        assert_eq!(
            parse_line("max -").unwrap(),
            Some(ReplCommand::Price(PriceBound::Max, None))
        );
        assert_eq!(
            parse_line("sort price-desc").unwrap(),
            Some(ReplCommand::Sort(SortOption::PriceDesc))
        );
        assert_eq!(parse_line("QUIT").unwrap(), Some(ReplCommand::Quit));
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_line("size"),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_line("min cheap"),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_line("sort random"),
            Err(CatalogError::InvalidSortOption(_))
        ));
        assert!(matches!(
            parse_line("teleport"),
            Err(CatalogError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_render_view() {
        let mut criteria = FilterCriteria::with_category(Some("Dresses".to_string()));
        criteria.toggle_size("M");
        let view = CatalogView {
            criteria,
            price_input: PriceRange {
                min: Some(Decimal::from(20)),
                max: None,
            },
            products: vec![ProductSummary {
                id: "p1".to_string(),
                name: "Wrap Dress".to_string(),
                price: Decimal::from(75),
                original_price: Some(Decimal::from(100)),
                images: Vec::new(),
                category: "Dresses".to_string(),
                colors: Vec::new(),
                sizes: vec!["M".to_string()],
                is_new_arrival: true,
                is_sale: false,
                is_featured: false,
                created_at: None,
            }],
            fetch_state: FetchState::Error("Invalid price range".to_string()),
            fetch_count: 2,
            ..CatalogView::default()
        };

        let text = render_view(&view);
        assert!(text.starts_with("[error: Invalid price range (type `retry`)] 1 product(s)"));
        assert!(text.contains("category: Dresses  sort: newest  filters: 2"));
        assert!(text.contains("sizes: M"));
        assert!(text.contains("price: 20 - * (pending)"));
        assert!(text.contains("  Wrap Dress  75  -25%  new"));
    }

    #[test]
    fn test_render_empty_result() {
        let view = CatalogView {
            fetch_count: 1,
            ..CatalogView::default()
        };

        let text = render_view(&view);
        assert!(text.contains("[ready] 0 product(s)"));
        assert!(text.contains("no products match these filters"));
    }
}
