use crate::form::FormField;
use crate::models::Product;
use crate::view::ProductListView;
use std::fmt::Write;

pub const TABLE_HEADERS: [&str; 9] = [
    "ID",
    "Nombre",
    "ID Tipo",
    "Tipo",
    "Costo",
    "Precio",
    "Stock Mínimo",
    "Stock",
    "Acciones",
];

/// The data cells of one table row, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: i64,
    pub cells: [String; 8],
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        ProductRow {
            id: p.id,
            cells: [
                p.id.to_string(),
                p.name.clone(),
                p.id_type.to_string(),
                p.product_type
                    .as_ref()
                    .map(|t| t.name.clone())
                    .unwrap_or_default(),
                format!("${}", p.cost_price),
                format!("${}", p.price),
                p.min_stock.to_string(),
                p.stock.to_string(),
            ],
        }
    }
}

pub fn render_view(view: &ProductListView) -> String {
    if view.is_loading() {
        return "<p class=\"loading\">Cargando productos...</p>".to_string();
    }

    let mut html = String::new();
    html.push_str("<div class=\"products\">\n");
    html.push_str("<h1>Gestión de Productos</h1>\n");
    render_form(&mut html, view);
    render_table(&mut html, &view.products);
    html.push_str("</div>\n");
    html
}

fn render_form(html: &mut String, view: &ProductListView) {
    let (title, action) = if view.is_editing() {
        ("Editar Producto", "Actualizar")
    } else {
        ("Agregar Producto", "Agregar")
    };

    let inputs = [
        (FormField::Name, "text", "Nombre"),
        (FormField::Price, "number", "Precio"),
        (FormField::Stock, "number", "Stock"),
    ];

    html.push_str("<form class=\"product-form\">\n");
    let _ = writeln!(html, "<h2>{title}</h2>");
    for (field, kind, placeholder) in inputs {
        let _ = writeln!(
            html,
            "<input type=\"{kind}\" name=\"{}\" placeholder=\"{placeholder}\" value=\"{}\">",
            field.as_str(),
            html_escape::encode_double_quoted_attribute(view.form.display_value(field)),
        );
    }
    let _ = writeln!(html, "<button type=\"submit\" data-action=\"submit\">{action}</button>");
    html.push_str("</form>\n");
}

fn render_table(html: &mut String, products: &[Product]) {
    html.push_str("<table class=\"product-table\">\n<thead>\n<tr>");
    for header in TABLE_HEADERS {
        let _ = write!(html, "<th>{header}</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in products.iter().map(ProductRow::from) {
        let _ = write!(html, "<tr data-id=\"{}\">", row.id);
        for cell in &row.cells {
            let _ = write!(html, "<td>{}</td>", html_escape::encode_text(cell));
        }
        let _ = writeln!(
            html,
            "<td><button data-action=\"edit\" data-id=\"{id}\">Editar</button>\
             <button data-action=\"delete\" data-id=\"{id}\">Eliminar</button></td></tr>",
            id = row.id,
        );
    }

    html.push_str("</tbody>\n</table>\n");
}
