//! Business presentation: creation, formation status, financials.

use super::shared::{display_date, dollars, or_dash, rule};
use crate::models::{Business, BusinessStatus, Expenses, Financials, NewBusiness};
use comfy_table::Table;

const STATUS_RULE: usize = 50;

pub fn format_business_created_text(request: &NewBusiness, business: &Business) -> String {
    let mut out = String::from("Creating business...\n");
    out.push_str(&format!("  Name: {}\n", request.legal_name));
    out.push_str(&format!("  Purpose: {}\n", or_dash(request.purpose.as_deref())));
    out.push_str(&format!("  Sponsor: {}\n", request.sponsor_email));

    out.push_str("\n✅ Business creation initiated!\n");
    out.push_str(&format!("   Business ID: {}\n", business.business_id));
    out.push_str(&format!("   Status: {}\n", or_dash(business.status.as_deref())));
    if let Some(sent) = business.sponsor_verification_sent {
        let sent = if sent { "yes" } else { "no" };
        out.push_str(&format!("   Sponsor verification sent: {}\n", sent));
    }
    if business.estimated_completion.is_some() {
        out.push_str(&format!(
            "   Estimated completion: {}\n",
            display_date(business.estimated_completion.as_deref())
        ));
    }

    if !business.next_steps.is_empty() {
        out.push_str("\n🚀 Next steps:\n");
        for (i, step) in business.next_steps.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, step));
        }
    }
    out.push_str(&format!(
        "\n💡 Track progress: clawprint check-status --business-id {}",
        business.business_id
    ));
    out
}

pub fn format_business_status_text(status: &BusinessStatus) -> String {
    let mut out = format!("Checking status for business: {}\n\n", status.business_id);
    out.push_str("📊 Business Status\n");
    out.push_str(&rule('─', STATUS_RULE));
    out.push('\n');
    if let Some(ref name) = status.name {
        out.push_str(&format!("Name: {}\n", name));
    }
    out.push_str(&format!(
        "Overall: {}\n",
        status.status.as_deref().unwrap_or("unknown").to_uppercase()
    ));

    if let Some(ref llc) = status.llc {
        out.push_str(&format!("\n📄 LLC Formation: {}\n", or_dash(llc.status.as_deref())));
        if let Some(ref state) = llc.state {
            out.push_str(&format!("   State: {}\n", state));
        }
        if let Some(ref number) = llc.file_number {
            out.push_str(&format!("   File #: {}\n", number));
            out.push_str(&format!("   Filed: {}\n", display_date(llc.filed_date.as_deref())));
        }
    }

    if let Some(ref ein) = status.ein {
        out.push_str(&format!("\n🏦 EIN: {}\n", or_dash(ein.status.as_deref())));
        if let Some(ref number) = ein.number {
            out.push_str(&format!("   Number: {}\n", number));
        }
        if ein.estimated_date.is_some() {
            out.push_str(&format!("   Expected: {}\n", display_date(ein.estimated_date.as_deref())));
        }
    }

    if let Some(ref bank) = status.bank_account {
        out.push_str(&format!("\n💰 Bank Account: {}\n", or_dash(bank.status.as_deref())));
        if let Some(ref provider) = bank.provider {
            out.push_str(&format!("   Provider: {}\n", provider));
        }
        if let Some(ref account) = bank.account {
            out.push_str(&format!("   Account: {}\n", account));
        }
        if let Some(balance) = bank.balance {
            out.push_str(&format!("   Balance: {}\n", dollars(balance)));
        }
        if bank.estimated_date.is_some() {
            out.push_str(&format!("   Expected: {}\n", display_date(bank.estimated_date.as_deref())));
        }
    }

    if let Some(ref sponsor) = status.sponsor {
        out.push_str(&format!(
            "\n👤 Sponsor: {}\n",
            or_dash(sponsor.verification_status.as_deref())
        ));
        if let Some(ref email) = sponsor.email {
            out.push_str(&format!("   Email: {}\n", email));
        }
    }
    out.push_str(&rule('─', STATUS_RULE));
    out
}

fn push_expense_line(out: &mut String, label: &str, amount: Option<f64>) {
    if let Some(amount) = amount {
        out.push_str(&format!("   {}: {}\n", label, dollars(amount)));
    }
}

pub fn format_financials_text(financials: &Financials, period: &str) -> String {
    let mut out = format!(
        "Getting financials for business: {}\nPeriod: {}\n\n",
        financials.business_id,
        financials.period.as_deref().unwrap_or(period)
    );
    out.push_str("📊 Financial Summary\n");
    out.push_str(&rule('─', STATUS_RULE));
    out.push('\n');
    if financials.period_start.is_some() || financials.period_end.is_some() {
        out.push_str(&format!(
            "Period: {} to {}\n",
            display_date(financials.period_start.as_deref()),
            display_date(financials.period_end.as_deref())
        ));
    }

    let figure = |value: Option<f64>| value.map(dollars).unwrap_or_else(|| "-".to_string());
    out.push_str(&format!("\n💰 Revenue: {}\n", figure(financials.revenue())));

    match financials.expenses() {
        Some(Expenses::Breakdown(breakdown)) => {
            out.push_str("\n💸 Expenses:\n");
            push_expense_line(&mut out, "Stripe fees", breakdown.stripe_fees);
            push_expense_line(&mut out, "Clawprint fees", breakdown.clawprint_fees);
            push_expense_line(&mut out, "Registered agent", breakdown.registered_agent);
            push_expense_line(&mut out, "Bookkeeping", breakdown.bookkeeping);
            out.push_str("   ─────────────────\n");
            out.push_str(&format!("   Total: {}\n", figure(breakdown.total)));
        }
        Some(Expenses::Total(total)) => {
            out.push_str(&format!("\n💸 Expenses: {}\n", dollars(*total)));
        }
        None => out.push_str("\n💸 Expenses: -\n"),
    }

    out.push_str(&format!("\n📈 Net Income: {}\n", figure(financials.net_income())));
    out.push_str(&format!("\n🏦 Current Balance: {}\n", figure(financials.balance())));
    out.push_str(&rule('─', STATUS_RULE));
    out.push('\n');

    out.push_str(&format!("\nRecent Transactions: {}", financials.transactions.len()));
    if !financials.transactions.is_empty() {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["Date", "Type", "Description", "Amount", "Status"]);
        for txn in &financials.transactions {
            table.add_row(vec![
                display_date(txn.date.as_deref()),
                or_dash(txn.kind.as_deref()).to_string(),
                or_dash(txn.description.as_deref()).to_string(),
                dollars(txn.amount),
                or_dash(txn.status.as_deref()).to_string(),
            ]);
        }
        out.push('\n');
        out.push_str(&table.to_string());
    }
    out
}
