#![allow(dead_code)]

use serde_json::{json, Value};

/// 11 个均被 "foo" 命中的实例
pub fn foo_instances() -> Value {
    json!([
        "foo", "afoo", "foob", "cfood", "/foo/", "\\foo\\", "!foo", "/foo", "foo\\", "FoofooFoo",
        "foot"
    ])
}

/// 一个可通过默认配置校验的小型真实语料库
pub fn sample_corpus() -> Value {
    json!([
        {
            "pattern": "Googlebot\\/",
            "url": "http://www.google.com/bot.html",
            "instances": [
                "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
                "Googlebot/2.1 (+http://www.google.com/bot.html)"
            ]
        },
        {
            "pattern": "bingbot",
            "addition_date": "2014/01/01",
            "instances": ["Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)"]
        },
        {
            "pattern": "Slurp",
            "instances": ["Mozilla/5.0 (compatible; Yahoo! Slurp; http://help.yahoo.com/help/us/ysearch/slurp)"]
        },
        {
            "pattern": "DuckDuckBot",
            "instances": ["DuckDuckBot/1.0; (+http://duckduckgo.com/duckduckbot.html)"]
        },
        {
            "pattern": "Baiduspider",
            "instances": ["Mozilla/5.0 (compatible; Baiduspider/2.0; +http://www.baidu.com/search/spider.html)"]
        },
        {
            "pattern": "YandexBot",
            "instances": ["Mozilla/5.0 (compatible; YandexBot/3.0; +http://yandex.com/bots)"]
        },
        {
            "pattern": "facebookexternalhit",
            "description": "Facebook link preview fetcher",
            "instances": ["facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)"]
        },
        {
            "pattern": "AhrefsBot",
            "instances": ["Mozilla/5.0 (compatible; AhrefsBot/7.0; +http://ahrefs.com/robot/)"]
        },
        {
            "pattern": "SemrushBot",
            "instances": ["Mozilla/5.0 (compatible; SemrushBot/7~bl; +http://www.semrush.com/bot.html)"]
        },
        {
            "pattern": "Applebot",
            "instances": [
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/13.1.1 Safari/605.1.15 (Applebot/0.1; +http://www.apple.com/go/applebot)"
            ]
        }
    ])
}

/// 在样例语料库末尾追加条目
pub fn sample_with(extra: Value) -> Value {
    let mut corpus = sample_corpus();
    if let (Some(items), Value::Array(more)) = (corpus.as_array_mut(), extra) {
        items.extend(more);
    }
    corpus
}
