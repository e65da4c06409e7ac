//! Cart commands.

use anyhow::{bail, Result};
use atelier_cache::FileStore;
use atelier_commerce::{CartChange, CartStore};
use dialoguer::Confirm;
use serde_json::json;

use super::{AddArgs, ClearArgs};
use crate::context::Context;

/// Open the store with the badge display subscribed to it.
fn open_with_badge(ctx: &Context) -> Result<CartStore<FileStore>> {
    let mut store = ctx.open_store()?;

    let output = ctx.output.clone();
    store.subscribe(move |event| {
        if let CartChange::ItemAdded { identity, merged: true, quantity } = &event.change {
            output.info(&format!("{} now x{}", identity, quantity));
        }
        output.badge(event.total_quantity);
    });

    Ok(store)
}

/// Add one unit of an item.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = open_with_badge(ctx)?;

    let total = store.add_item_with_variant(
        args.name.as_str(),
        args.price.as_str(),
        args.image.as_str(),
        args.size.as_deref(),
    )?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "total_quantity": total, "items": store.cart() }));
    }

    Ok(())
}

/// List the line items.
pub fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let cart = store.cart();

    if ctx.output.is_json() {
        ctx.output.json(cart);
        return Ok(());
    }

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.header("Cart");
    for item in cart {
        ctx.output
            .list_item(&format!("{} x{} @ {}", item.identity(), item.quantity, item.price));
        ctx.output.kv("image", &item.image);
    }
    println!();
    ctx.output.badge(store.total_quantity());

    Ok(())
}

/// Print the total quantity.
pub fn count(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let total = store.total_quantity();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "total_quantity": total }));
    } else {
        println!("{}", total);
    }

    Ok(())
}

/// Print the checkout summary.
pub fn summary(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let summary = store.summary();

    if ctx.output.is_json() {
        match summary {
            Some(summary) => ctx.output.json(&summary),
            None => ctx.output.json(&json!({ "empty": true })),
        }
        return Ok(());
    }

    let Some(summary) = summary else {
        ctx.output.info("Your cart is empty");
        return Ok(());
    };

    ctx.output.header("Order summary");
    println!("{}", summary.render());

    let unpriced = summary.unpriced_lines();
    if unpriced > 0 {
        ctx.output.warn(&format!(
            "{} item(s) could not be priced in {} and were left out of the total",
            unpriced, summary.currency
        ));
    }

    Ok(())
}

/// Empty the cart.
pub fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = open_with_badge(ctx)?;

    if !args.yes {
        if ctx.output.is_json() {
            bail!("Refusing to clear without confirmation in JSON mode. Pass --yes.");
        }

        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", store.total_quantity()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    store.clear()?;
    ctx.output.success("Cart cleared");

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "total_quantity": 0 }));
    }

    Ok(())
}
