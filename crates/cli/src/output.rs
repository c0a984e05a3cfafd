//! Plain-text rendering of panel data.

#![allow(clippy::print_stdout)]

use inventory_panel_client::api::DashboardSnapshot;
use inventory_panel_client::notice::Notice;
use inventory_panel_core::charts::{MovementChart, RankingChart};
use inventory_panel_core::models::{Category, Movement, Product, User};

pub fn line(text: &str) {
    println!("{text}");
}

pub fn notice(notice: &Notice) {
    println!("{notice}");
}

pub fn user(user: &User) {
    println!("{} <{}> ({})", user.username, user.email, user.role.as_str());
}

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }
    println!("{:>5}  {:<30} {:<18} {:>12} {:>6}  STATUS", "ID", "NAME", "CATEGORY", "PRICE", "STOCK");
    for p in products {
        println!(
            "{:>5}  {:<30} {:<18} {:>12} {:>6}  {}",
            p.id,
            p.name,
            p.category_name().unwrap_or("-"),
            p.price.display(),
            p.stock,
            p.stock_level().label()
        );
    }
}

pub fn product(product: &Product) {
    println!("#{} {}", product.id, product.name);
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }
    println!("  Category: {}", product.category_name().unwrap_or("-"));
    println!("  Price:    {}", product.price);
    println!("  Stock:    {} ({})", product.stock, product.stock_level().label());
    if let Some(image) = product.image() {
        println!("  Image:    {image}");
    }
}

pub fn categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found");
        return;
    }
    for c in categories {
        if c.description.is_empty() {
            println!("{:>5}  {}", c.id, c.name);
        } else {
            println!("{:>5}  {} - {}", c.id, c.name, c.description);
        }
    }
}

pub fn movements(movements: &[Movement]) {
    if movements.is_empty() {
        println!("No movements found");
        return;
    }
    for m in movements {
        println!(
            "{:>5}  {}  {:<3} {:>6}  {:<30} {}",
            m.id,
            m.movement_date.format("%Y-%m-%d %H:%M"),
            m.kind.as_str(),
            m.quantity,
            m.product_label(),
            m.user_label()
        );
    }
}

pub fn dashboard(snapshot: &DashboardSnapshot, movement_chart: &MovementChart, ranking: &RankingChart) {
    let stats = &snapshot.stats;
    println!("Products:        {}", stats.total_products);
    println!("Categories:      {}", stats.total_categories);
    println!("Units in stock:  {}", stats.total_stock);
    println!("Low stock:       {}", stats.low_stock_products);
    println!("Users:           {}", stats.total_users);
    println!(
        "Inventory value: {}",
        inventory_panel_core::types::price::format_currency(stats.total_inventory_value)
    );

    println!();
    println!("Units moved ({})", snapshot.summary.period);
    for (label, value) in movement_chart.labels.iter().zip(movement_chart.values) {
        println!("  {label:<4} {value}");
    }

    if !ranking.is_empty() {
        println!();
        println!("Most moved");
        for (name, count) in ranking.entries() {
            println!("  {name:<30} {count}");
        }
    }

    println!();
    println!("Low stock alerts");
    products(&snapshot.low_stock);

    println!();
    println!("Recent movements");
    movements(&snapshot.recent_movements);
}
