use crate::error::Result;
use molkit::core::elements::Element;

pub fn run() -> Result<()> {
    print!("{}", render_table());
    Ok(())
}

/// One row per element in canonical formula order.
pub fn render_table() -> String {
    let mut table = format!("{:<8}{:>8}{:>10}\n", "Symbol", "Valence", "Weight");
    for element in Element::ALL {
        table.push_str(&format!(
            "{:<8}{:>8}{:>10.1}\n",
            element.symbol(),
            element.valence(),
            element.weight()
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_elements_in_canonical_order() {
        let table = render_table();
        let symbols: Vec<&str> = table
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().next())
            .collect();

        assert_eq!(
            symbols,
            vec!["C", "H", "O", "B", "Br", "Cl", "F", "Mg", "N", "P", "S"]
        );
    }

    #[test]
    fn rows_carry_valence_and_weight() {
        let table = render_table();
        let chlorine = table
            .lines()
            .find(|line| line.starts_with("Cl "))
            .unwrap();
        let fields: Vec<&str> = chlorine.split_whitespace().collect();
        assert_eq!(fields, vec!["Cl", "1", "35.5"]);
    }
}
