//! Order e-mails.
//!
//! Rendering uses Askama templates under `templates/email/`; delivery goes
//! through [`GmailClient`]. Sending is best-effort: failures are logged and
//! never fail the request that triggered them.

use askama::Template;
use grasshopper_core::{Cents, Email, OrderId, OrderType};
use tracing::{error, info};

use super::gmail::{GmailClient, OutgoingEmail};

/// One purchased line as shown in e-mails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Cents,
}

impl EmailLine {
    #[must_use]
    pub fn line_total(&self) -> Cents {
        self.unit_price * self.quantity
    }
}

/// Shipping destination block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipTo {
    pub name: String,
    pub street: String,
    pub apt: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Everything the owner notification and the customer receipt show.
#[derive(Debug, Clone)]
pub struct OrderEmail {
    pub items: Vec<EmailLine>,
    pub subtotal: Cents,
    pub shipping: Cents,
    pub tax: Cents,
    pub discount: Cents,
    pub total: Cents,
    pub order_id: OrderId,
    pub payment_id: String,
    pub is_free: bool,
    pub order_type: OrderType,
    pub phone: Option<String>,
    pub customer_email: Option<Email>,
    pub ship_to: Option<ShipTo>,
    pub promo_code: Option<String>,
}

impl OrderEmail {
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        if self.order_type.is_pickup() {
            "Local Pickup"
        } else {
            "Shipping"
        }
    }

    #[must_use]
    pub fn phone_display(&self) -> &str {
        self.phone.as_deref().unwrap_or("Not provided")
    }

    #[must_use]
    pub fn customer_email_display(&self) -> &str {
        self.customer_email.as_ref().map_or("Not provided", Email::as_str)
    }

    #[must_use]
    pub fn owner_subject(&self) -> String {
        format!(
            "New {} Order - {}",
            self.order_type.label(),
            if self.is_free { "FREE" } else { "PAID" }
        )
    }
}

/// A pickup checkout link was handed to a customer.
#[derive(Debug, Clone)]
pub struct PickupRequestEmail {
    pub phone: String,
    pub items: Vec<EmailLine>,
    pub subtotal: Cents,
    pub checkout_url: String,
}

#[derive(Template)]
#[template(path = "email/owner_order.txt")]
struct OwnerOrderText<'a> {
    order: &'a OrderEmail,
}

#[derive(Template)]
#[template(path = "email/receipt.html")]
struct ReceiptHtml<'a> {
    order: &'a OrderEmail,
}

#[derive(Template)]
#[template(path = "email/pickup_request.txt")]
struct PickupRequestText<'a> {
    request: &'a PickupRequestEmail,
}

/// Owner notification for a paid (or free) order.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn owner_notification(owner: &Email, order: &OrderEmail) -> Result<OutgoingEmail, askama::Error> {
    Ok(OutgoingEmail {
        to: owner.to_string(),
        subject: order.owner_subject(),
        text: OwnerOrderText { order }.render()?,
        html: None,
    })
}

/// Customer receipt, when the order carries an e-mail address.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn customer_receipt(order: &OrderEmail) -> Result<Option<OutgoingEmail>, askama::Error> {
    let Some(to) = order.customer_email.as_ref() else {
        return Ok(None);
    };
    Ok(Some(OutgoingEmail {
        to: to.to_string(),
        subject: "Your Order from The Grasshopper".to_string(),
        text: format!(
            "Thank you for your order! Order #{}. Total: {}.",
            order.order_id.short_ref(),
            order.total
        ),
        html: Some(ReceiptHtml { order }.render()?),
    }))
}

/// Owner notification for a pickup checkout link.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn pickup_request(owner: &Email, request: &PickupRequestEmail) -> Result<OutgoingEmail, askama::Error> {
    Ok(OutgoingEmail {
        to: owner.to_string(),
        subject: "New Local Pickup Order".to_string(),
        text: PickupRequestText { request }.render()?,
        html: None,
    })
}

/// Best-effort order mail delivery.
#[derive(Clone)]
pub struct Mailer {
    gmail: Option<GmailClient>,
    owner: Email,
}

impl Mailer {
    #[must_use]
    pub const fn new(gmail: Option<GmailClient>, owner: Email) -> Self {
        Self { gmail, owner }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.gmail.is_some()
    }

    /// Send one message, returning whether it went out.
    pub async fn deliver(&self, email: &OutgoingEmail) -> bool {
        let Some(gmail) = &self.gmail else {
            info!(to = %email.to, subject = %email.subject, "Gmail not configured, email not sent");
            return false;
        };
        match gmail.send(email).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, subject = %email.subject, "Email error");
                false
            }
        }
    }

    /// Owner notification, then the customer receipt when there is an address.
    pub async fn order_placed(&self, order: &OrderEmail) {
        match owner_notification(&self.owner, order) {
            Ok(email) => {
                self.deliver(&email).await;
            }
            Err(e) => error!(error = %e, "Failed to render owner notification"),
        }
        match customer_receipt(order) {
            Ok(Some(email)) => {
                self.deliver(&email).await;
            }
            Ok(None) => {}
            Err(e) => error!(error = %e, "Failed to render customer receipt"),
        }
    }

    pub async fn pickup_requested(&self, request: &PickupRequestEmail) {
        match pickup_request(&self.owner, request) {
            Ok(email) => {
                self.deliver(&email).await;
            }
            Err(e) => error!(error = %e, "Failed to render pickup notification"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn owner() -> Email {
        Email::parse("owner@shopgrasshopper.com").unwrap()
    }

    fn order(order_type: OrderType) -> OrderEmail {
        OrderEmail {
            items: vec![
                EmailLine {
                    name: "Olaplex No. 3 Hair Perfector".to_string(),
                    quantity: 2,
                    unit_price: Cents::new(2400),
                },
                EmailLine {
                    name: "CW Dream Coat - 6.7 oz".to_string(),
                    quantity: 1,
                    unit_price: Cents::new(2300),
                },
            ],
            subtotal: Cents::new(7100),
            shipping: Cents::new(1290),
            tax: Cents::new(463),
            discount: Cents::new(710),
            total: Cents::new(8143),
            order_id: OrderId::new_unchecked("ord_9f8e7d6c5b4a"),
            payment_id: "pay_123".to_string(),
            is_free: false,
            order_type,
            phone: Some("(704) 555-0100".to_string()),
            customer_email: Some(Email::parse("ana@example.com").unwrap()),
            ship_to: Some(ShipTo {
                name: "Ana Lima".to_string(),
                street: "12 Elm St".to_string(),
                apt: Some("Apt 4".to_string()),
                city: "Charlotte".to_string(),
                state: "NC".to_string(),
                zip: "28202".to_string(),
            }),
            promo_code: Some("WELCOME10".to_string()),
        }
    }

    #[test]
    fn test_owner_notification_for_shipping_order() {
        let email = owner_notification(&owner(), &order(OrderType::Shipping)).unwrap();
        assert_eq!(email.to, "owner@shopgrasshopper.com");
        assert_eq!(email.subject, "New Shipping Order - PAID");
        assert!(email.html.is_none());

        let text = &email.text;
        assert!(text.starts_with("New Shipping Order - PAID"));
        assert!(text.contains("Customer Phone: (704) 555-0100"));
        assert!(text.contains("Customer Email: ana@example.com"));
        assert!(text.contains("12 Elm St, Apt 4"));
        assert!(text.contains("Charlotte, NC 28202"));
        assert!(text.contains("- Olaplex No. 3 Hair Perfector (Qty: 2) - $24.00"));
        assert!(text.contains("Discount (WELCOME10): -$7.10"));
        assert!(text.contains("Shipping: $12.90"));
        assert!(text.contains("Total: $81.43"));
        assert!(text.contains("Order ID: ord_9f8e7d6c5b4a"));
        assert!(text.contains("Order needs to be shipped to the address above."));
    }

    #[test]
    fn test_owner_notification_for_free_pickup() {
        let mut pickup = order(OrderType::Pickup);
        pickup.is_free = true;
        pickup.payment_id = "FREE".to_string();
        pickup.discount = Cents::ZERO;
        pickup.phone = None;

        let email = owner_notification(&owner(), &pickup).unwrap();
        assert_eq!(email.subject, "New Pickup Order - FREE");
        assert!(email.text.starts_with("New Local Pickup Order - FREE ORDER"));
        assert!(email.text.contains("Customer Phone: Not provided"));
        assert!(email.text.contains("Shipping: $0.00 (Local Pickup)"));
        assert!(!email.text.contains("Discount"));
        assert!(email.text.contains("within 24 hours to arrange pickup."));
    }

    #[test]
    fn test_customer_receipt() {
        let email = customer_receipt(&order(OrderType::Shipping)).unwrap().unwrap();
        assert_eq!(email.to, "ana@example.com");
        assert_eq!(
            email.text,
            "Thank you for your order! Order #7D6C5B4A. Total: $81.43."
        );
        let html = email.html.unwrap();
        assert!(html.contains("Order #7D6C5B4A"));
        assert!(html.contains("$48.00"));
        assert!(html.contains("Discount (WELCOME10)"));
        assert!(html.contains("will ship soon"));
    }

    #[test]
    fn test_receipt_escapes_item_names() {
        let mut o = order(OrderType::Shipping);
        o.items.first_mut().unwrap().name = "<b>Pete & Pedro</b>".to_string();
        let html = customer_receipt(&o).unwrap().unwrap().html.unwrap();
        assert!(!html.contains("<b>Pete"));
        assert!(html.contains("&lt;b&gt;Pete"));
    }

    #[test]
    fn test_no_receipt_without_address() {
        let mut o = order(OrderType::Shipping);
        o.customer_email = None;
        assert!(customer_receipt(&o).unwrap().is_none());
    }

    #[test]
    fn test_pickup_request() {
        let request = PickupRequestEmail {
            phone: "704-555-0100".to_string(),
            items: vec![EmailLine {
                name: "Ouai Hair Oil".to_string(),
                quantity: 3,
                unit_price: Cents::new(2200),
            }],
            subtotal: Cents::new(6600),
            checkout_url: "https://square.link/u/abc".to_string(),
        };
        let email = pickup_request(&owner(), &request).unwrap();
        assert_eq!(email.subject, "New Local Pickup Order");
        assert!(email.text.contains("- Ouai Hair Oil (Qty: 3) - $22.00"));
        assert!(email.text.contains("Total: $66.00"));
        assert!(email.text.contains("Please contact them at 704-555-0100 within 24 hours"));
        assert!(email.text.contains("Order Link: https://square.link/u/abc"));
    }

    #[tokio::test]
    async fn test_unconfigured_mailer_skips() {
        let mailer = Mailer::new(None, owner());
        assert!(!mailer.is_configured());
        let email = owner_notification(&owner(), &order(OrderType::Shipping)).unwrap();
        assert!(!mailer.deliver(&email).await);
    }
}
