use serde::Serialize;

use crate::metadata::{FeaturedItem, ItemPage};
use crate::repository::Family;

#[derive(Serialize, Debug)]
pub struct FeaturedSlot {
    pub family: Family,
    pub label: &'static str,
    pub item: Option<FeaturedItem>,
    pub placeholder: String,
}

#[derive(Serialize, Debug)]
pub struct IndexPageData<'a> {
    pub site_name: &'a str,
    pub slots: Vec<FeaturedSlot>,
}

#[derive(Serialize, Debug)]
pub struct Section {
    pub family: Family,
    pub label: &'static str,
    pub cards: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct AboutPageData<'a> {
    pub site_name: &'a str,
    pub sections: Vec<Section>,
}

#[derive(Serialize, Debug)]
pub struct ListPageData<'a> {
    pub site_name: &'a str,
    pub family: Family,
    pub label: &'static str,
    pub path: String,
    pub cards: Vec<String>,
    pub example: FeaturedItem,
}

#[derive(Serialize, Debug)]
pub struct ItemPageData<'a> {
    pub site_name: &'a str,
    pub family: Family,
    pub path: String,
    pub meta: &'a ItemPage,
}

#[derive(Serialize, Debug)]
pub struct AddPageData<'a> {
    pub site_name: &'a str,
    pub family: Family,
    pub label: &'static str,
    pub categories: Vec<String>,
    pub new_category: &'static str,
}

#[derive(Serialize, Debug)]
pub struct UpdatePageData<'a> {
    pub site_name: &'a str,
    pub family: Family,
    pub path: String,
    pub category: String,
    pub slug: String,
    pub content: String,
}
