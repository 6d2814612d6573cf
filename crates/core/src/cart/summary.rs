//! Cart Summary

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{cart::CartState, pricing::format_price};

/// Render the cart as the table shown on the checkout review, followed by its totals.
pub fn render_summary(state: &CartState) -> String {
    if state.is_empty() {
        return "Tu carrito está vacío".to_string();
    }

    let mut builder = Builder::default();

    builder.push_record(["Producto", "Formato", "Precio", "Cantidad", "Total"]);

    for line in state.items() {
        builder.push_record([
            line.name().to_string(),
            line.weight_label(),
            format_price(line.price()),
            line.quantity().to_string(),
            format_price(line.total()),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Alignment::center());
    table.modify(Columns::new(2..), Alignment::right());

    format!(
        "{table}\nProductos: {}\nTotal: {}",
        state.total_items(),
        format_price(state.total_amount())
    )
}
