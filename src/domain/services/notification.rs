use crate::domain::models::payment::Payment;
use crate::domain::models::tenant::Tenant;

/// Pure string construction for outbound WhatsApp messages and receipt
/// links. Nothing here performs network I/O; the presentation layer decides
/// what to do with the resulting URLs.

/// Formats an FCFA amount with space-grouped thousands and no decimals,
/// e.g. `50 000`.
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Reduces a raw phone number to digits only, tolerating one leading `+`.
/// Returns `None` when nothing usable remains.
pub fn sanitize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let digits: String = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

pub fn receipt_message(payment: &Payment, tenant: &Tenant) -> String {
    format!(
        "Bonjour {}, votre paiement de {} FCFA pour la période {} a bien été reçu. Merci ! 🏠",
        tenant.full_name,
        format_amount(payment.amount),
        payment.period
    )
}

/// Receipt confirmation carrying the download link for the PDF receipt.
pub fn receipt_message_with_link(payment: &Payment, tenant: &Tenant, receipt_url: &str) -> String {
    format!(
        "{}\n\nTéléchargez votre quittance ici : {}",
        receipt_message(payment, tenant),
        receipt_url
    )
}

pub fn reminder_message(tenant: &Tenant, amount: f64, period: &str) -> String {
    format!(
        "Bonjour {}, sauf erreur de notre part, nous n'avons pas encore reçu votre loyer de {} FCFA pour la période {}. Merci de régulariser votre situation dès que possible. 🏠",
        tenant.full_name,
        format_amount(amount),
        period
    )
}

/// "Download receipt" reference built from the payment's opaque token.
pub fn receipt_url(base_url: &str, payment: &Payment) -> String {
    format!(
        "{}/receipts/{}",
        base_url.trim_end_matches('/'),
        payment.receipt_token
    )
}

/// Pre-filled `wa.me` deep link. Without a usable phone number the link still
/// works; WhatsApp then asks the sender to pick a recipient.
pub fn whatsapp_link(phone: Option<&str>, message: &str) -> String {
    let encoded = urlencoding::encode(message);
    match phone.and_then(sanitize_phone) {
        Some(digits) => format!("https://wa.me/{}?text={}", digits, encoded),
        None => format!("https://wa.me/?text={}", encoded),
    }
}
