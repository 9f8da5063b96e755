use std::collections::{HashMap, HashSet};

use serde::Serialize;
use wayfare_domain::Booking;

/// Group key used when a booking carries no value for the grouping field
pub const UNKNOWN_KEY: &str = "Unknown";

pub const DEFAULT_TOP_LIMIT: usize = 5;

/// How bookings are grouped for a ranking.
///
/// `key` picks the group, `label` a display name, `counterpart` the party on
/// the other side of the booking whose distinct ids are counted per group.
#[derive(Clone, Copy)]
pub struct Grouping {
    pub key: fn(&Booking) -> Option<&str>,
    pub label: fn(&Booking) -> Option<&str>,
    pub counterpart: fn(&Booking) -> Option<&str>,
}

impl Grouping {
    pub const BY_PARTNER: Grouping = Grouping {
        key: |b| b.partner_id.as_deref(),
        label: |b| b.partner_name.as_deref(),
        counterpart: |b| b.customer_id.as_deref(),
    };

    pub const BY_CUSTOMER: Grouping = Grouping {
        key: |b| b.customer_id.as_deref(),
        label: |b| b.customer_name.as_deref(),
        counterpart: |b| b.partner_id.as_deref(),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankBy {
    #[default]
    Count,
    Revenue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopEntity {
    pub key: String,
    /// First non-empty display name seen for the group
    pub label: Option<String>,
    pub count: usize,
    pub revenue: f64,
    pub distinct_counterparts: usize,
}

/// Group, rank descending by `rank_by` and keep the first `limit` groups.
///
/// Ranking uses a stable sort: groups that tie keep the order in which they
/// first appeared in `bookings`.
pub fn compute_top_entities(
    bookings: &[Booking],
    grouping: Grouping,
    rank_by: RankBy,
    limit: usize,
) -> Vec<TopEntity> {
    let mut groups: Vec<(TopEntity, HashSet<&str>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for booking in bookings {
        let key = (grouping.key)(booking).unwrap_or(UNKNOWN_KEY);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((
                TopEntity {
                    key: key.to_string(),
                    label: None,
                    count: 0,
                    revenue: 0.0,
                    distinct_counterparts: 0,
                },
                HashSet::new(),
            ));
            groups.len() - 1
        });

        let (entity, counterparts) = &mut groups[slot];
        entity.count += 1;
        entity.revenue += booking.amount;
        if entity.label.is_none() {
            entity.label = (grouping.label)(booking).map(str::to_string);
        }
        if let Some(counterpart) = (grouping.counterpart)(booking) {
            counterparts.insert(counterpart);
        }
    }

    let mut ranked: Vec<TopEntity> = groups
        .into_iter()
        .map(|(mut entity, counterparts)| {
            entity.distinct_counterparts = counterparts.len();
            entity
        })
        .collect();

    match rank_by {
        RankBy::Count => ranked.sort_by(|a, b| b.count.cmp(&a.count)),
        RankBy::Revenue => ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue)),
    }
    ranked.truncate(limit);
    ranked
}

/// Partners by booking count, with distinct customers per partner.
/// Direct bookings are grouped under [`UNKNOWN_KEY`].
pub fn top_partners(bookings: &[Booking], limit: usize) -> Vec<TopEntity> {
    compute_top_entities(bookings, Grouping::BY_PARTNER, RankBy::Count, limit)
}

/// Customers by booking count, with distinct partners per customer.
pub fn top_customers(bookings: &[Booking], limit: usize) -> Vec<TopEntity> {
    compute_top_entities(bookings, Grouping::BY_CUSTOMER, RankBy::Count, limit)
}
