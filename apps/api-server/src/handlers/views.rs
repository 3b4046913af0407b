//! Domain -> wire conversions.

use postboard_core::domain::{Comment, Post, Reaction, Statistics};
use postboard_shared::dto::{CommentResponse, PostResponse, StatisticsResponse};

pub fn post(post: Post) -> PostResponse {
    let liked = post.liked().iter().map(ToString::to_string).collect();
    let disliked = post.disliked().iter().map(ToString::to_string).collect();
    let comments = post.comments().iter().cloned().map(comment).collect();
    let (likes, dislikes) = (post.likes(), post.dislikes());

    PostResponse {
        id: post.id,
        author: post.author.to_string(),
        title: post.title,
        content: post.content,
        image: post.image,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.map(|at| at.to_rfc3339()),
        comments,
        likes,
        dislikes,
        liked,
        disliked,
    }
}

pub fn posts(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(post).collect()
}

pub fn comment(comment: Comment) -> CommentResponse {
    CommentResponse {
        author: comment.author.to_string(),
        content: comment.content,
        created_at: comment.created_at.to_rfc3339(),
    }
}

pub fn reaction(reaction: Option<Reaction>) -> Option<String> {
    reaction.map(|r| {
        match r {
            Reaction::Liked => "liked",
            Reaction::Disliked => "disliked",
        }
        .to_string()
    })
}

pub fn statistics(stats: Statistics) -> StatisticsResponse {
    StatisticsResponse {
        total_posts: stats.total_posts,
        unique_authors: stats.unique_authors,
        most_liked_post: post(stats.most_liked_post),
        most_disliked_post: post(stats.most_disliked_post),
    }
}
