use cms_shared::{Footer, Header};

use super::{nav_links, ServiceContext, ServiceError};

pub const COLLECTION: &str = "site";
pub const HEADER_ID: &str = "header";
pub const FOOTER_ID: &str = "footer";

/// Site header; all-default when the document does not exist.
pub async fn get_header_data(ctx: &ServiceContext) -> Result<Header, ServiceError> {
    let Some(doc) = ctx.store.get(COLLECTION, HEADER_ID).await? else {
        return Ok(Header::default());
    };

    Ok(Header {
        logo_url: doc.string_or_default("logo_url"),
        logo_alt: doc.string_or_default("logo_alt"),
        links: nav_links(doc.raw("links")),
    })
}

/// Site footer; all-default when the document does not exist.
pub async fn get_footer_data(ctx: &ServiceContext) -> Result<Footer, ServiceError> {
    let Some(doc) = ctx.store.get(COLLECTION, FOOTER_ID).await? else {
        return Ok(Footer::default());
    };

    Ok(Footer {
        text: doc.string_or_default("text"),
        links: nav_links(doc.raw("links")),
        copyright: doc.string_or_default("copyright"),
    })
}
