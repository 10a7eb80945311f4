//! Fakes and page fixtures shared by the unit tests.
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use book_common::error::CommonError;
use book_common::http::FetchText;
use chrono::{DateTime, TimeZone, Utc};

use crate::assemble::Clock;
use crate::html::{Locator, Node, ParsedDocument};

pub const SEARCH_PAGE: &str = r#"<html><body>
<ul id="yesSchList">
  <li><div><div class="item_info"><div class="info_row info_name">
    <a class="gd_name" href="/Product/Goods/12345">Dune</a>
  </div></div></div></li>
  <li><div><div class="item_info"><div class="info_row info_name">
    <a class="gd_name" href="/Product/Goods/99999">Dune Messiah</a>
  </div></div></div></li>
</ul>
</body></html>"#;

pub const EMPTY_SEARCH_PAGE: &str = r#"<html><body><ul id="yesSchList"></ul><p>검색결과가 없습니다.</p></body></html>"#;

pub const DETAIL_PAGE: &str = r#"<html><body>
<div id="yDetailTopWrap">
  <div class="topColLft"><div><span><em><img src="https://image.yes24.com/goods/12345/XL" alt="Dune"></em></span></div></div>
  <div class="topColRgt">
    <div class="gd_infoTop">
      <div><h2 class="gd_name">Dune (Deluxe Edition)</h2><h3 class="gd_nameE">A Novel?</h3></div>
      <span class="gd_pubArea">
        <span class="gd_auth"><a href="/author/1"> Frank Herbert </a><a href="/author/2">Brian Herbert</a>
          <span><span class="moreAuthLi"><span><ul>
            <li><a href="/author/1">Frank Herbert</a></li>
            <li><a href="/author/3">Kevin J. Anderson</a></li>
          </ul></span></span></span>
        </span>
        <span class="gd_pub"><a>황금가지</a></span>
        <span class="gd_date">2021년 03월 15일</span>
      </span>
    </div>
  </div>
</div>
<div id="infoset_goodsCate"><div class="infoSetCont_wrap">
  <dl><dt>카테고리 분류</dt><dd><ul>
    <li><a>국내도서</a></li>
    <li><a>소 설</a></li>
    <li><a>소설</a></li>
  </ul></dd></dl>
  <dl><dt>다른 분류</dt><dd><ul><li><a>eBook</a></li></ul></dd></dl>
</div></div>
<div id="infoset_specific"><div class="infoSetCont_wrap"><div><table><tbody>
  <tr><th>발행일</th><td>2021년 03월 15일</td></tr>
  <tr><th>쪽수, 무게, 크기</th><td>352쪽 | 130*188*30mm</td></tr>
</tbody></table></div></div></div>
<div id="infoset_introduce"><div class="infoSetCont_wrap"><div class="infoWrap_txt"><div>&lt;b&gt;The spice&lt;/b&gt; must flow.&lt;br/&gt;   [Book one] of *the* saga   </div></div></div></div>
<div id="infoset_toc"><div class="infoSetCont_wrap"><div class="infoWrap_txt">## Part 1&lt;br /&gt;Chapter 1&lt;br&gt;Chapter 2</div></div></div>
</body></html>"#;

/// Records every requested URL and answers from a fixed route table.
///
/// A route matches when its key is a substring of the URL; the first match wins.
/// `Err(status)` routes and unmatched URLs fail with [`CommonError::Status`].
#[derive(Default)]
pub struct FakeFetcher {
    routes: Vec<(String, Result<String, u16>)>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url_part: &str, body: &str) -> Self {
        self.routes.push((url_part.to_string(), Ok(body.to_string())));
        self
    }

    pub fn fail(mut self, url_part: &str, status: u16) -> Self {
        self.routes.push((url_part.to_string(), Err(status)));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FetchText for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, CommonError> {
        self.calls.lock().unwrap().push(url.to_string());
        let outcome = self
            .routes
            .iter()
            .find(|(part, _)| url.contains(part.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or(Err(404));

        outcome.map_err(|status| CommonError::Status {
            status,
            url: url.to_string(),
        })
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
                .single()
                .unwrap(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// In-memory document keyed by locator.
#[derive(Default)]
pub struct MockDocument {
    nodes: HashMap<Locator, Vec<Node>>,
}

impl MockDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: Locator, node: Node) -> Self {
        self.nodes.entry(locator).or_default().push(node);
        self
    }

    pub fn with_text(self, locator: Locator, text: &str) -> Self {
        self.with(locator, Node::new(text))
    }
}

impl ParsedDocument for MockDocument {
    fn select_all(&self, locator: Locator) -> Vec<Node> {
        self.nodes.get(&locator).cloned().unwrap_or_default()
    }
}
