// URL builders for the Riot Web API endpoints used by the client.

pub const MAX_MATCH_IDS_PER_PAGE: usize = 100;

/// Regional routing value (americas/europe/asia/sea) for a platform region.
pub fn regional_routing(region: &str) -> &'static str {
    match region {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" | "me1" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => "americas", // default
    }
}

pub fn account_url(game_name: &str, tag_line: &str) -> String {
    format!(
        "https://americas.api.riotgames.com/riot/account/v1/accounts/by-riot-id/{}/{}",
        game_name, tag_line
    )
}

pub fn league_entries_url(region: &str, puuid: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/league/v4/entries/by-puuid/{}",
        region, puuid
    )
}

pub fn match_ids_url(region: &str, puuid: &str, queue_id: Option<i32>, start: usize, count: usize) -> String {
    let mut url = format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/by-puuid/{}/ids?type=ranked&start={}&count={}",
        regional_routing(region),
        puuid,
        start,
        count.min(MAX_MATCH_IDS_PER_PAGE)
    );
    if let Some(queue) = queue_id {
        url.push_str(&format!("&queue={}", queue));
    }
    url
}

pub fn match_url(region: &str, match_id: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/{}",
        regional_routing(region),
        match_id
    )
}
