use anyhow::Result;

use crate::menu::{Course, CourseAverages, MenuItem};
use infra::ids::Id;

pub trait Request {
    type Resp;
}

pub trait Queryable<Req>
where
    Req: Request,
{
    fn query(&self, req: Req) -> Result<Req::Resp>;
}

/// Requests that change state. Taking `&mut self` keeps every write on one
/// path.
pub trait Commandable<Req>
where
    Req: Request,
{
    fn execute(&mut self, req: Req) -> Result<Req::Resp>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMenuItem {
    pub dish_name: String,
    pub description: String,
    pub course: String,
    pub price: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMenu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AveragePrices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterMenu(pub Option<Course>);

impl Request for AddMenuItem {
    type Resp = Id<MenuItem>;
}

impl Request for ShowMenu {
    type Resp = Vec<MenuItem>;
}

impl Request for AveragePrices {
    type Resp = CourseAverages;
}

impl Request for FilterMenu {
    type Resp = Vec<MenuItem>;
}
