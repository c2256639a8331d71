mod price_list;

pub(crate) use price_list::{read_price_list, PriceListRow, PriceListSummary};
