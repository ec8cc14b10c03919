//! Invoice presentation: creation, status report, payment links.

use super::shared::{display_date, dollars, money, quantity, rule, RULE_WIDTH};
use crate::models::{Invoice, InvoiceTotals, LineItem, PaymentLink};

/// Status emoji; unknown statuses get a question mark.
pub fn status_emoji(status: &str) -> &'static str {
    match status {
        "draft" => "📝",
        "sent" => "📤",
        "viewed" => "👀",
        "paid" => "✅",
        "overdue" => "⚠️",
        "cancelled" => "❌",
        "refunded" => "↩️",
        _ => "❓",
    }
}

fn invoice_number(invoice: &Invoice) -> &str {
    invoice.invoice_number.as_deref().unwrap_or("(unnumbered)")
}

/// Example items shown when `create-invoice` falls back to the default.
pub fn format_default_line_items_notice(items: &[LineItem]) -> String {
    let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
    let totals = InvoiceTotals::from_line_items(items);
    format!(
        "📝 No line items provided, using example:\n{}\n   Expected: {} + {} tax = {}\n",
        json,
        dollars(totals.amount),
        dollars(totals.tax_amount),
        dollars(totals.total_amount)
    )
}

pub fn format_invoice_created_text(invoice: &Invoice) -> String {
    let currency = invoice.currency.as_str();
    let mut out = String::from("✅ Invoice created successfully!\n\n");
    out.push_str(&format!("📄 Invoice ID: {}\n", invoice.invoice_id));
    out.push_str(&format!("📝 Invoice Number: {}\n", invoice_number(invoice)));
    out.push_str(&format!("👤 Customer: {}\n", invoice.customer_label()));
    out.push_str(&format!("💰 Total: {}\n", money(currency, invoice.total_amount)));
    out.push_str(&format!("   ├ Subtotal: {}\n", money(currency, invoice.amount)));
    out.push_str(&format!("   └ Tax: {}\n", money(currency, invoice.tax_amount)));
    out.push_str(&format!("📅 Due: {}\n", display_date(invoice.due_date.as_deref())));
    out.push_str(&format!("📊 Status: {}\n", invoice.status_str()));

    if !invoice.line_items.is_empty() {
        out.push_str("\n📋 Line Items:\n");
        for (i, item) in invoice.line_items.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, item.description));
            out.push_str(&format!(
                "     Qty: {} × ${:.2} = ${:.2}\n",
                quantity(item.quantity),
                item.unit_price,
                item.subtotal()
            ));
            if let Some(rate) = item.tax_rate.filter(|r| *r != 0.0) {
                out.push_str(&format!("     Tax: {}% = ${:.2}\n", quantity(rate), item.tax()));
            }
        }
    }

    out.push_str("\n🚀 Next steps:\n");
    out.push_str(&format!(
        "  1. Generate payment link: clawprint generate-payment-link --invoice-id {}\n",
        invoice.invoice_id
    ));
    out.push_str("  2. Share link with customer to receive payment\n");
    out.push_str(&format!(
        "  3. Track payment status: clawprint check-invoice-status --invoice-id {}",
        invoice.invoice_id
    ));
    out
}

pub fn format_invoice_status_text(invoice: &Invoice) -> String {
    let currency = invoice.currency.as_str();
    let heavy = rule('═', RULE_WIDTH);
    let status = invoice.status_str();

    let mut out = format!("{}\n📄 INVOICE\n{}\n\n", heavy, heavy);
    out.push_str("📋 Invoice Details:\n");
    out.push_str(&format!("   Invoice ID:      {}\n", invoice.invoice_id));
    out.push_str(&format!("   Invoice Number:  {}\n", invoice_number(invoice)));
    out.push_str(&format!(
        "   Business ID:     {}\n\n",
        invoice.business_id.as_deref().unwrap_or("-")
    ));

    out.push_str("👤 Customer:\n");
    out.push_str(&format!(
        "   Name:     {}\n",
        invoice.customer_name.as_deref().unwrap_or("(Not provided)")
    ));
    out.push_str(&format!(
        "   Email:    {}\n\n",
        invoice.customer_email.as_deref().unwrap_or("-")
    ));

    out.push_str("📅 Dates:\n");
    out.push_str(&format!("   Issued:   {}\n", display_date(invoice.issued_date.as_deref())));
    out.push_str(&format!("   Due:      {}\n", display_date(invoice.due_date.as_deref())));
    if invoice.paid_at.is_some() {
        out.push_str(&format!("   Paid:     {}\n", display_date(invoice.paid_at.as_deref())));
    }
    if invoice.viewed_at.is_some() {
        out.push_str(&format!("   Viewed:   {}\n", display_date(invoice.viewed_at.as_deref())));
    }

    out.push_str("\n📊 Status:\n");
    out.push_str(&format!(
        "   Status:   {} {}\n\n",
        status_emoji(status),
        status.to_uppercase()
    ));

    out.push_str("💰 Amount:\n");
    out.push_str(&format!("   Subtotal: {}\n", money(currency, invoice.amount)));
    out.push_str(&format!("   Tax:      {}\n", money(currency, invoice.tax_amount)));
    out.push_str(&format!("   TOTAL:    {}\n", money(currency, invoice.total_amount)));

    if !invoice.line_items.is_empty() {
        out.push_str("\n📦 Line Items:\n");
        for (i, item) in invoice.line_items.iter().enumerate() {
            let tax = match item.tax_rate {
                Some(rate) if rate != 0.0 => format!(" + {}% tax", quantity(rate)),
                _ => String::new(),
            };
            out.push_str(&format!("   {}. {}\n", i + 1, item.description));
            out.push_str(&format!(
                "      {} × {} = {}{}\n",
                quantity(item.quantity),
                money(currency, item.unit_price),
                money(currency, item.subtotal()),
                tax
            ));
        }
    }

    if let Some(ref link) = invoice.stripe_payment_link {
        out.push_str("\n💳 Payment Link:\n");
        out.push_str(&format!("   URL:      {}\n", link));
        out.push_str(&format!(
            "   Stripe ID: {}\n",
            invoice.stripe_invoice_id.as_deref().unwrap_or("-")
        ));
    } else if status != "paid" && status != "cancelled" {
        out.push_str("\n⚠️  No payment link generated yet.\n");
        out.push_str(&format!(
            "   Generate one: clawprint generate-payment-link --invoice-id {}\n",
            invoice.invoice_id
        ));
    }

    if let Some(ref notes) = invoice.notes {
        out.push_str(&format!("\n📝 Notes:\n   {}\n", notes));
    }
    if let Some(ref terms) = invoice.payment_terms {
        out.push_str(&format!("\n📋 Payment Terms:\n   {}\n", terms));
    }

    out.push('\n');
    out.push_str(&heavy);
    match status {
        "draft" => {
            out.push_str("\n\n💡 Next step: Generate payment link to send to customer\n");
            out.push_str(&format!(
                "   clawprint generate-payment-link --invoice-id {}",
                invoice.invoice_id
            ));
        }
        "sent" => out.push_str("\n\n💡 Waiting for customer payment..."),
        "paid" => out.push_str("\n\n✅ Payment received! Thank you."),
        "overdue" => out.push_str("\n\n⚠️  Invoice is overdue. Follow up with customer."),
        _ => {}
    }
    out
}

fn invoice_summary(invoice: &Invoice) -> String {
    format!(
        "✅ Invoice found:\n\n📄 Invoice: {}\n👤 Customer: {}\n💰 Amount: {}\n\n",
        invoice_number(invoice),
        invoice.customer_label(),
        money(&invoice.currency, invoice.total_amount)
    )
}

/// The invoice already carries a link; nothing was generated.
pub fn format_existing_payment_link_text(invoice: &Invoice, link: &str) -> String {
    let mut out = invoice_summary(invoice);
    out.push_str("✨ Payment link already exists for this invoice:\n");
    out.push_str(&format!("🔗 {}\n\n", link));
    out.push_str("📋 Link Details:\n");
    out.push_str("   Status: Payment link already active\n");
    out.push_str("   Share this URL with the customer to collect payment");
    out
}

pub fn format_payment_link_text(invoice: &Invoice, link: &PaymentLink) -> String {
    let mut out = invoice_summary(invoice);
    out.push_str("✅ Payment link generated successfully!\n\n");
    out.push_str(&format!("🔗 Payment Link:\n   {}\n\n", link.payment_link_url));
    out.push_str("📋 Link Details:\n");
    out.push_str(&format!(
        "   Stripe Invoice ID: {}\n",
        link.stripe_invoice_id.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("   Expires: {}\n\n", display_date(link.expires_at.as_deref())));
    out.push_str(&format!(
        "💡 Share this link with your customer:\n   👉 {}\n\n",
        link.payment_link_url
    ));
    out.push_str("📊 Next steps:\n");
    out.push_str("   1. Send the link to your customer via email or message\n");
    out.push_str("   2. Customer clicks the link and pays via Stripe\n");
    out.push_str("   3. Payment is automatically recorded in the invoice\n");
    out.push_str(&format!(
        "   4. Check status: clawprint check-invoice-status --invoice-id {}",
        invoice.invoice_id
    ));
    out
}

/// `generate-invoice`: the one-line invoice plus its payment URL.
pub fn format_generated_invoice_text(invoice: &Invoice, link: &PaymentLink) -> String {
    let description = invoice
        .line_items
        .first()
        .map(|item| item.description.as_str())
        .unwrap_or("-");
    let mut out = String::from("Generating invoice...\n");
    out.push_str(&format!(
        "  Business: {}\n",
        invoice.business_id.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("  Amount: {}\n", money(&invoice.currency, invoice.total_amount)));
    out.push_str(&format!("  Description: {}\n", description));
    out.push_str(&format!("  Customer: {}\n", invoice.customer_label()));
    out.push_str("\n✅ Invoice generated!\n");
    out.push_str(&format!("   Invoice ID: {}\n", invoice.invoice_id));
    out.push_str(&format!("   Status: {}\n", invoice.status_str()));
    out.push_str(&format!("   Due: {}\n", display_date(invoice.due_date.as_deref())));
    out.push_str(&format!("\n💳 Payment URL: {}\n", link.payment_link_url));
    out.push_str("\nSend this link to your customer to collect payment.");
    out
}
