//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the mobile site and run the
//! full crawl cycle end-to-end: seed profile → counts → timeline (with a
//! truncated post and a second page) → comments (with a deferred author
//! lookup) → follow/fan listings, all landing in a SQLite database.

use rusqlite::Connection;
use weibo_harvest::config::{Config, CrawlerConfig, HttpConfig, OutputConfig};
use weibo_harvest::crawler::Coordinator;
use weibo_harvest::storage::SqliteSink;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEED: u64 = 1699432410;

fn test_config(base_url: &str, db_path: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            seeds: vec![SEED],
            base_url: base_url.to_string(),
            max_concurrent_fetches: 2,
            request_delay_ms: 0,
        },
        http: HttpConfig {
            user_agent: "Mozilla/5.0 (integration test)".to_string(),
            timeout_secs: 5,
        },
        output: OutputConfig {
            database_path: db_path.to_string(),
        },
    }
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_paged(server: &MockServer, page_path: &str, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn info_page() -> String {
    r#"<html><body>
    <div class="c">昵称:人民网<br/>认证:人民网官方微博<br/>性别:男<br/>地区:北京 海淀区<br/>简介:报道全球 传播中国<br/>生日:1997-01-01<br/>感情状况:单身<br/>性取向:女<br/>会员等级:6级<br/>标签:新闻&#160;资讯&#160;媒体更多>></div>
    <div class="c"><a href="/account">资料完善度</a></div>
    </body></html>"#
        .to_string()
}

fn counts_page() -> String {
    format!(
        r#"<html><body><div class="tip2">微博[3]&nbsp;<a href="/{SEED}/follow">关注[10]</a>&nbsp;<a href="/{SEED}/fans">粉丝[20]</a></div></body></html>"#
    )
}

fn timeline_page_one() -> String {
    format!(
        r#"<html><body>
        <div class="c" id="M_Bt1aaa">
          <div>
            <span class="ctt">好天气<img src="//h5.sinaimg.cn/m/emoticon/icon/default/d_taiyang.png" alt="[太阳]"/>出去走走</span>
          </div>
          <div>
            <a href="/attitude/Bt1aaa?uid={SEED}&amp;rl=0">赞[12]</a>
            <a href="/repost/Bt1aaa?uid={SEED}&amp;rl=0">转发[3]</a>
            <a href="/comment/Bt1aaa?uid={SEED}&amp;rl=0#cmtfrm">评论[4]</a>
            <span class="ct">2023-05-06 11:27:00&#160;来自iPhone客户端</span>
          </div>
        </div>
        <div class="c" id="M_Bt2bbb">
          <div>
            <span class="cmt">转发了<a href="/u/777">老王</a>的微博:</span>
            <span class="ctt">原文内容在这里</span>
          </div>
          <div>
            <span class="cmt">转发理由:</span>说得好<img src="//h5.sinaimg.cn/m/emoticon/icon/default/d_zan.png" alt="[赞啊]"/><a href="/u/888">@某人</a>&#160;
            <a href="/attitude/Bt2bbb?uid={SEED}&amp;rl=0">赞[2]</a>
            <a href="/repost/Bt2bbb?uid={SEED}&amp;rl=0">转发[0]</a>
            <a href="/comment/Bt2bbb?uid={SEED}&amp;rl=0#cmtfrm">评论[1]</a>
            <span class="ct">2023-05-06 10:00:00&#160;来自微博网页版</span>
          </div>
        </div>
        <div class="c" id="M_Bt3ccc">
          <div>
            <span class="ctt">这条很长的微博只显示了一半</span><a href="/{SEED}/Bt3ccc?ckAll=1">全文</a>
          </div>
          <div>
            <a href="/attitude/Bt3ccc?uid={SEED}&amp;rl=0">赞[0]</a>
            <a href="/repost/Bt3ccc?uid={SEED}&amp;rl=0">转发[0]</a>
            <a href="/comment/Bt3ccc?uid={SEED}&amp;rl=0#cmtfrm">评论[0]</a>
            <span class="ct">2023-05-06 09:00:00&#160;来自Android</span>
          </div>
        </div>
        <div class="pa" id="pagelist"><form action="/{SEED}/profile" method="post"><div><input type="submit" value="跳页" />&nbsp;1/2页</div></form></div>
        </body></html>"#
    )
}

fn timeline_page_two() -> String {
    "<html><body><div class=\"c\">暂无更多微博</div></body></html>".to_string()
}

fn full_content_page() -> String {
    format!(
        r#"<html><body><div id="M_">
        <div><a href="/u/{SEED}">人民网</a>:这条很长的微博现在是完整内容了&#160;<span class="ct">05月06日 09:00</span></div>
        </div></body></html>"#
    )
}

fn comment_page() -> String {
    r#"<html><body>
    <div class="c" id="C_4001">
      <a href="/u/2222222">评论者甲</a><span class="ctt">:写得真好<img src="//h5.sinaimg.cn/m/emoticon/icon/default/d_good.png" alt="[good]"/></span>
      <span class="cc"><a href="/attitude/c1">赞[0]</a></span>
      <a href="/report/c1">举报</a>
      <span class="ct">2023-05-06 12:00:00&#160;来自iPhone</span>
    </div>
    <div class="c" id="C_4002">
      <a href="/vanityhandle">评论者乙</a><span class="ctt">:不错</span>
      <a href="/report/c2">举报</a>
      <span class="ct">2023-05-06 12:30:00&#160;来自Android</span>
    </div>
    </body></html>"#
        .to_string()
}

fn empty_comment_page() -> String {
    "<html><body><div class=\"c\">还没有人针对这条微博发表评论!</div></body></html>".to_string()
}

fn lookup_page() -> String {
    r#"<html><body><div class="tip2"><a href="/3333333/follow">关注[45]</a>&#160;<a href="/3333333/fans">粉丝[67]</a></div></body></html>"#
        .to_string()
}

fn follow_page() -> String {
    r#"<html><body><table><tr>
    <td><a href="/u/1000001">用户一</a></td>
    <td><a href="/attention/add?uid=1000001&amp;rl=1">关注他</a></td>
    </tr></table></body></html>"#
        .to_string()
}

fn fans_page() -> String {
    r#"<html><body><table><tr>
    <td><a href="/u/1000002">用户二</a></td>
    <td><a href="/attention/remove?uid=1000002&amp;rl=1">移除</a></td>
    </tr></table></body></html>"#
        .to_string()
}

async fn mount_site(server: &MockServer) {
    mount_page(server, &format!("/{SEED}/info"), info_page()).await;
    mount_page(server, &format!("/u/{SEED}"), counts_page()).await;
    mount_paged(server, &format!("/{SEED}/profile"), "1", timeline_page_one()).await;
    mount_paged(server, &format!("/{SEED}/profile"), "2", timeline_page_two()).await;
    mount_paged(server, &format!("/{SEED}/follow"), "1", follow_page()).await;
    mount_paged(server, &format!("/{SEED}/fans"), "1", fans_page()).await;
    mount_paged(server, "/comment/Bt1aaa", "1", comment_page()).await;
    mount_paged(server, "/comment/Bt2bbb", "1", empty_comment_page()).await;
    mount_paged(server, "/comment/Bt3ccc", "1", empty_comment_page()).await;
    mount_page(server, &format!("/{SEED}/Bt3ccc"), full_content_page()).await;
    mount_page(server, "/vanityhandle", lookup_page()).await;
}

async fn run_crawl_against(server: &MockServer, db_path: &str) {
    let config = test_config(&server.uri(), db_path);
    let sink = SqliteSink::open(std::path::Path::new(db_path)).expect("open sink");
    let mut coordinator = Coordinator::new(config, sink).expect("build coordinator");
    let stats = coordinator.run().await.expect("crawl run");
    assert!(stats.pages_fetched >= 10, "stats: {stats:?}");
}

#[tokio::test]
async fn test_full_crawl_lands_all_records() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("harvest.db");
    let db_path = db_path.to_str().unwrap();
    run_crawl_against(&server, db_path).await;

    let conn = Connection::open(db_path).unwrap();

    // Profile: assembled from info page plus counts page.
    let (nick, gender, province, city, orientation): (
        String,
        String,
        String,
        String,
        String,
    ) = conn
        .query_row(
            "SELECT nick_name, gender, province, city, sex_orientation
             FROM profiles WHERE id = ?1",
            [SEED as i64],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            },
        )
        .unwrap();
    assert_eq!(nick, "人民网");
    assert_eq!(gender, "男");
    assert_eq!(province, "北京");
    assert_eq!(city, "海淀区");
    assert_eq!(orientation, "opposite-sex");

    let (tweets_num, follows_num, fans_num): (i64, i64, i64) = conn
        .query_row(
            "SELECT tweet_count, follow_count, fan_count FROM profiles WHERE id = ?1",
            [SEED as i64],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!((tweets_num, follows_num, fans_num), (3, 10, 20));

    // Tweets: one original, one repost, one resolved from the full-content
    // page.
    let tweet_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM tweets", [], |row| row.get(0))
        .unwrap();
    assert_eq!(tweet_rows, 3);

    let content: String = conn
        .query_row(
            "SELECT content FROM tweets WHERE id = ?1",
            [format!("{SEED}_Bt1aaa")],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(content, "好天气[太阳]出去走走");

    let (reason, original): (String, String) = conn
        .query_row(
            "SELECT content, original_content FROM tweets WHERE id = ?1",
            [format!("{SEED}_Bt2bbb")],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(reason, "说得好[赞啊]@某人");
    assert_eq!(original, "原文内容在这里");

    let resolved: String = conn
        .query_row(
            "SELECT content FROM tweets WHERE id = ?1",
            [format!("{SEED}_Bt3ccc")],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(resolved, "这条很长的微博现在是完整内容了");

    let likes: i64 = conn
        .query_row(
            "SELECT like_count FROM tweets WHERE id = ?1",
            [format!("{SEED}_Bt1aaa")],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(likes, 12);

    // Comments: the direct author id and the one resolved through the
    // secondary lookup.
    let direct_author: i64 = conn
        .query_row(
            "SELECT user_id FROM comments WHERE id = 'C_4001'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(direct_author, 2222222);

    let looked_up: i64 = conn
        .query_row(
            "SELECT user_id FROM comments WHERE id = 'C_4002'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(looked_up, 3333333);

    let comment_tweet_url: String = conn
        .query_row(
            "SELECT tweet_url FROM comments WHERE id = 'C_4001'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(comment_tweet_url, format!("{}/{SEED}/Bt1aaa", server.uri()));

    // Edges: follows listing orients the seed as follower, fans listing as
    // followed.
    let forward: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM relationships WHERE follower_id = ?1 AND followed_id = 1000001",
            [SEED as i64],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(forward, 1);

    let backward: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM relationships WHERE follower_id = 1000002 AND followed_id = ?1",
            [SEED as i64],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(backward, 1);
}

#[tokio::test]
async fn test_unreachable_pages_do_not_abort_the_run() {
    let server = MockServer::start().await;
    // Only the seed's info and counts pages exist; everything else is 404.
    mount_page(&server, &format!("/{SEED}/info"), info_page()).await;
    mount_page(&server, &format!("/u/{SEED}"), counts_page()).await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("harvest.db");
    let db_path = db_path.to_str().unwrap();

    let config = test_config(&server.uri(), db_path);
    let sink = SqliteSink::open(std::path::Path::new(db_path)).expect("open sink");
    let mut coordinator = Coordinator::new(config, sink).expect("build coordinator");
    let stats = coordinator.run().await.expect("crawl run");
    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.pages_failed, 3);

    let conn = Connection::open(db_path).unwrap();
    let profiles: i64 = conn
        .query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))
        .unwrap();
    assert_eq!(profiles, 1);
}
