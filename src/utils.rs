// src/utils.rs

/// Formats an amount with Indian digit grouping, e.g. `1,23,456.70`.
pub fn format_amount(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "—".to_string();
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if whole.len() <= 3 {
        whole.to_string()
    } else {
        let (head, tail) = whole.split_at(whole.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            groups.push(right);
            rest = left;
        }
        groups.push(rest);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{sign}{grouped}.{fraction}")
}

pub fn format_growth(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:+.1}%"),
        None => "—".to_string(),
    }
}
