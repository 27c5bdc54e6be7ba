// Video card: a one-shot projection of VideoMetadata.

use crate::format::format_count;
use crate::models::VideoMetadata;
use crate::sanitize::escape_html;

pub fn render_video_card(video: &VideoMetadata) -> String {
    let thumbnail = if video.thumbnail.trim().is_empty() {
        String::new()
    } else {
        format!(
            r#"<img class="video-thumbnail" src="{}" alt="">"#,
            escape_html(&video.thumbnail)
        )
    };

    format!(
        r#"<section class="video-card" id="videoInfo">
{thumbnail}<div class="video-details">
<h2 class="video-title">{title}</h2>
<p class="video-channel">{channel}</p>
<div class="video-stats">
<span class="stat">{views} views</span>
<span class="stat">{likes} likes</span>
<span class="stat">{comments} comments</span>
</div>
</div>
</section>"#,
        title = escape_html(&video.title),
        channel = escape_html(&video.channel_title),
        views = format_count(video.view_count),
        likes = format_count(video.like_count),
        comments = format_count(video.comment_count),
    )
}
