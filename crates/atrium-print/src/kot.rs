//! # Kitchen Order Ticket
//!
//! The slip sent to the kitchen when new lines land on an order. Carries
//! only what the kitchen needs: quantities, item names, and notes, never
//! prices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ticket::TicketBuilder;

/// One line on a kitchen ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KotLine {
    pub quantity: i64,
    pub item_name: String,
    /// Preparation note (`no onions`); empty for none.
    pub note: String,
}

/// A kitchen order ticket for one dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KotTicket {
    /// Where the food goes: `TABLE T1`, `ROOM 101`, `TAKEOUT`, `DELIVERY`.
    pub label: String,
    /// Short ticket id shown to kitchen staff (`KOT-T1-1842`).
    pub ticket_id: String,
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<KotLine>,
}

impl KotTicket {
    /// Builds a ticket, deriving the id from the label and issue time.
    pub fn new(label: impl Into<String>, issued_at: DateTime<Utc>, lines: Vec<KotLine>) -> Self {
        let label = label.into();
        let compact: String = label.chars().filter(|c| !c.is_whitespace()).collect();
        KotTicket {
            ticket_id: format!("KOT-{}-{}", compact, issued_at.format("%H%M")),
            label,
            issued_at,
            lines,
        }
    }

    /// Renders the ticket as fixed-width text.
    pub fn render(&self) -> String {
        let mut b = TicketBuilder::default();

        b.center("KITCHEN TICKET");
        b.blank();
        b.center(&self.label);
        b.blank();
        b.center(&format!("Time: {}", self.issued_at.format("%d-%b %H:%M")));
        b.center(&format!("ID: {}", self.ticket_id));
        b.eq_sep();

        b.line_lr("QTY  ITEM", "");
        for line in &self.lines {
            b.line(&format!("{:>3}  {}", line.quantity, line.item_name));
            if !line.note.is_empty() {
                b.line(&format!("     * {}", line.note));
            }
            b.sep();
        }

        b.finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 18, 42, 0).unwrap()
    }

    #[test]
    fn ticket_id_compacts_label() {
        let ticket = KotTicket::new("TABLE T1", issued(), vec![]);
        assert_eq!(ticket.ticket_id, "KOT-TABLET1-1842");
    }

    #[test]
    fn render_lists_quantities_and_notes() {
        let ticket = KotTicket::new(
            "TABLE T1",
            issued(),
            vec![
                KotLine {
                    quantity: 2,
                    item_name: "Classic Burger".to_string(),
                    note: "no onions".to_string(),
                },
                KotLine {
                    quantity: 1,
                    item_name: "French Fries".to_string(),
                    note: String::new(),
                },
            ],
        );

        let text = ticket.render();
        assert!(text.contains("KITCHEN TICKET"));
        assert!(text.contains("  2  Classic Burger"));
        assert!(text.contains("* no onions"));
        assert!(text.contains("  1  French Fries"));
        // Prices never reach the kitchen
        assert!(!text.contains('.'));
    }
}
