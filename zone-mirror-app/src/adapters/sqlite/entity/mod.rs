//! `SeaORM` entities for the zone cache.

pub mod dns_record;
pub mod zone;
