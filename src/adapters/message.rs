use crate::adapters::presentation::{format_currency, format_percent, group_thousands};
use crate::config::pricing_config::{DisplayConfig, OrderConfig};
use crate::domain::model::OrderDetails;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use url::Url;

/// 下單訊息：摘要文字與預填內容的 WhatsApp 連結。只產生字串，不開啟連結。
pub struct OrderMessage<'a> {
    order: &'a OrderDetails,
    display: &'a DisplayConfig,
    order_config: &'a OrderConfig,
}

impl<'a> OrderMessage<'a> {
    pub fn new(order: &'a OrderDetails, display: &'a DisplayConfig, order_config: &'a OrderConfig) -> Self {
        Self {
            order,
            display,
            order_config,
        }
    }

    pub fn summary(&self) -> String {
        let sep = self.display.thousands_separator;
        let request = &self.order.request;
        let quote = &self.order.quote;

        let mut text = format!(
            " *🖱️ Pedido ({}) - {}*\n\n",
            self.order_config.shop_name, self.order_config.game
        );
        text.push_str(&format!(
            "📊 *MMR Atual:* {}\n",
            group_thousands(request.current_rating, sep)
        ));
        text.push_str(&format!(
            "🎯 *MMR Desejado:* {}\n",
            group_thousands(request.desired_rating, sep)
        ));
        text.push_str(&format!(
            "⚡ *MMR a Ganhar:* {}\n",
            group_thousands(quote.rating_gain, sep)
        ));
        text.push_str(&format!(
            "💰 *Preço Base:* {}\n",
            format_currency(quote.base_price, self.display)
        ));

        if quote.has_discount() {
            text.push_str(&format!(
                "🎁 *Desconto:* {}\n",
                format_percent(quote.discount_percent)
            ));
            text.push_str(&format!(
                "💵 *Preço Final:* {}\n",
                format_currency(quote.final_price, self.display)
            ));
        }

        let off_stream = if self.order.off_stream {
            "Sim (taxa extra)"
        } else {
            "Não"
        };
        text.push_str(&format!("🎥 *Off-stream:* {}\n", off_stream));
        text.push_str("Gostaria de prosseguir com este pedido!");

        text
    }

    pub fn deep_link(&self) -> Result<Url> {
        let contact = validate_required_field("order.contact_number", &self.order_config.contact_number)?;

        let mut url = Url::parse(&format!(
            "{}/{}",
            self.order_config.link_base.trim_end_matches('/'),
            contact
        ))?;
        url.set_query(Some(&format!("text={}", urlencoding::encode(&self.summary()))));

        tracing::debug!("Built order link for contact {}", contact);
        Ok(url)
    }
}
