//! Index field paths referenced by queries.

pub const TYPE: &str = "type";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";

pub const BIRTH_DATE: &str = "details.birth_date";
pub const RELEASE_DATE: &str = "details.release_date";

pub const DIRECTOR: &str = "details.director";
pub const GENRE: &str = "details.genre";
pub const DOMAIN: &str = "details.domain";
pub const NATIONALITY: &str = "details.nationality";
pub const BIRTH_PLACE: &str = "details.birth_place";
pub const CAPITAL: &str = "details.capital";
pub const CONTINENT: &str = "details.continent";
